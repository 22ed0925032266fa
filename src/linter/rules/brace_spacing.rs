use scuff_parser::text::range;
use scuff_parser::{NodeKind, StyleNode, TextSize};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

pub struct BraceSpacingRule;

impl Rule for BraceSpacingRule {
    fn name(&self) -> &'static str {
        "brace-spacing"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Rule, NodeKind::AtRule]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let Some((prelude_end, open)) = prelude_and_brace(node) else {
            return Ok(Vec::new());
        };
        let (prelude_end, open): (usize, usize) = (prelude_end.into(), open.into());
        let gap = &cx.source[prelude_end..open];
        if gap == " " {
            return Ok(Vec::new());
        }

        let message = if gap.is_empty() {
            "Missing space before `{`"
        } else if gap.contains('\n') {
            "Opening brace should be on the same line as the selector"
        } else {
            "Expected exactly one space before `{`"
        };

        let location = Location::from_range(range(open, open + 1), cx.source);
        let diagnostic = Diagnostic::error(location, self.name(), message).with_fix(Fix::single(
            "Put a single space before `{`",
            range(prelude_end, open),
            " ",
        ));
        Ok(vec![diagnostic])
    }
}

fn prelude_and_brace(node: &StyleNode) -> Option<(TextSize, TextSize)> {
    match node {
        StyleNode::Rule(rule) => Some((rule.prelude.end(), rule.block.open)),
        StyleNode::AtRule(at_rule) => at_rule
            .block
            .as_ref()
            .map(|block| (at_rule.prelude_end(), block.open)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::{apply, check_scss};

    #[test]
    fn test_single_space_is_clean() {
        let input = ".a {\n}\n@media print {\n}\n";
        assert!(check_scss(&BraceSpacingRule, input).is_empty());
    }

    #[test]
    fn test_missing_space() {
        let input = ".avatar{\n}\n";
        let diagnostics = check_scss(&BraceSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 8);
        assert_eq!(apply(input, &diagnostics), ".avatar {\n}\n");
    }

    #[test]
    fn test_brace_on_next_line() {
        let input = ".a\n{\n}\n";
        let diagnostics = check_scss(&BraceSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("same line"));
        assert_eq!(apply(input, &diagnostics), ".a {\n}\n");
    }

    #[test]
    fn test_at_rule_without_params() {
        let input = "@font-face  {\n}\n";
        let diagnostics = check_scss(&BraceSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(apply(input, &diagnostics), "@font-face {\n}\n");
    }

    #[test]
    fn test_at_rule_without_block_is_ignored() {
        assert!(check_scss(&BraceSpacingRule, "@import 'base';\n").is_empty());
    }
}
