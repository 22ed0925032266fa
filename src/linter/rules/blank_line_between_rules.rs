use scuff_parser::text::{is_first_on_line, line_start, offset_to_line, range};
use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Consecutive sibling rules are separated by exactly one blank line.
///
/// Whitespace is not part of the tree, so the blank lines are counted from
/// the line numbers of the previous rule's end and this rule's start.
pub struct BlankLineBetweenRulesRule;

impl Rule for BlankLineBetweenRulesRule {
    fn name(&self) -> &'static str {
        "blank-line-between-rules"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Rule]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let Some(previous @ StyleNode::Rule(_)) = cx.previous_sibling() else {
            return Ok(Vec::new());
        };

        let start: usize = node.range().start().into();
        // Layout within a line belongs to the indentation rule.
        if !is_first_on_line(cx.source, start) {
            return Ok(Vec::new());
        }

        let prev_end: usize = previous.range().end().into();
        let prev_line = offset_to_line(cx.source, prev_end.saturating_sub(1));
        let line = offset_to_line(cx.source, start);
        let blank_lines = line.saturating_sub(prev_line + 1);
        if blank_lines == 1 {
            return Ok(Vec::new());
        }

        let message = if blank_lines == 0 {
            "Expected a blank line between rules".to_string()
        } else {
            format!("Expected exactly one blank line between rules, found {blank_lines}")
        };
        let location = Location::from_range(node.range(), cx.source);
        let diagnostic = Diagnostic::warning(location, self.name(), message).with_fix(Fix::single(
            "Separate rules with one blank line",
            range(prev_end, line_start(cx.source, start)),
            "\n\n",
        ));
        Ok(vec![diagnostic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::{apply, check_scss};

    #[test]
    fn test_one_blank_line() {
        let input = ".a {\n}\n\n.b {\n}\n";
        assert!(check_scss(&BlankLineBetweenRulesRule, input).is_empty());
    }

    #[test]
    fn test_adjacent_rules() {
        let input = ".a {\n}\n.b {\n}\n";
        let diagnostics = check_scss(&BlankLineBetweenRulesRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 3);
        assert_eq!(apply(input, &diagnostics), ".a {\n}\n\n.b {\n}\n");
    }

    #[test]
    fn test_too_many_blank_lines_nested() {
        let input = ".a {\n  .b {\n  }\n\n\n  .c {\n  }\n}\n";
        let diagnostics = check_scss(&BlankLineBetweenRulesRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("found 2"));
        assert_eq!(
            apply(input, &diagnostics),
            ".a {\n  .b {\n  }\n\n  .c {\n  }\n}\n"
        );
    }

    #[test]
    fn test_only_rule_siblings_are_checked() {
        let input = ".a {\n  color: red;\n  .b {\n  }\n}\n";
        assert!(check_scss(&BlankLineBetweenRulesRule, input).is_empty());
    }

    #[test]
    fn test_comment_between_rules_is_left_alone() {
        let input = ".a {\n}\n// next\n.b {\n}\n";
        assert!(check_scss(&BlankLineBetweenRulesRule, input).is_empty());
    }
}
