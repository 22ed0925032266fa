use scuff_parser::selector::compounds;
use scuff_parser::{NodeKind, RuleNode, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// ID selectors are discouraged. A lone top-level ID that only wraps nested
/// rules is tolerated; an ID inside another rule is always an error.
pub struct NoIdSelectorsRule;

impl Rule for NoIdSelectorsRule {
    fn name(&self) -> &'static str {
        "no-id-selectors"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Rule]
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let StyleNode::Rule(rule) = node else {
            return Ok(Vec::new());
        };

        let mut diagnostics = Vec::new();
        for selector in &rule.selectors {
            let Some(id) = compounds(&selector.text)
                .into_iter()
                .find_map(|c| c.ids.into_iter().next())
            else {
                continue;
            };

            let location = Location::from_range(selector.range, cx.source);
            if cx.nesting.rule_depth > 0 {
                let context = if cx.nesting.inside_id {
                    " inside another ID selector"
                } else {
                    ""
                };
                diagnostics.push(Diagnostic::error(
                    location,
                    self.name(),
                    format!("ID selector `#{id}` must never be nested{context}"),
                ));
            } else if !is_structural_wrapper(rule) {
                diagnostics.push(Diagnostic::warning(
                    location,
                    self.name(),
                    format!("Avoid ID selector `#{id}`, use a class instead"),
                ));
            }
        }

        Ok(diagnostics)
    }
}

/// A single top-level selector whose block holds no declarations of its own.
fn is_structural_wrapper(rule: &RuleNode) -> bool {
    rule.selectors.len() == 1
        && !rule
            .block
            .children
            .iter()
            .any(|child| matches!(child, StyleNode::Declaration(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::check_scss;

    #[test]
    fn test_classes_are_fine() {
        let input = ".page .title {\n  color: red;\n}\n";
        assert!(check_scss(&NoIdSelectorsRule, input).is_empty());
    }

    #[test]
    fn test_styled_id_is_a_warning() {
        let input = "#header {\n  color: red;\n}\n";
        let diagnostics = check_scss(&NoIdSelectorsRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("#header"));
    }

    #[test]
    fn test_wrapper_id_is_allowed() {
        let input = "#app {\n  .header {\n    color: red;\n  }\n}\n";
        assert!(check_scss(&NoIdSelectorsRule, input).is_empty());
    }

    #[test]
    fn test_grouped_id_is_a_warning() {
        let input = "#app, .shell {\n  .header {\n  }\n}\n";
        let diagnostics = check_scss(&NoIdSelectorsRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_nested_id_is_an_error() {
        let input = ".page {\n  #main {\n  }\n}\n";
        let diagnostics = check_scss(&NoIdSelectorsRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].location.line, 2);
    }

    #[test]
    fn test_id_in_media_query_is_top_level() {
        let input = "@media print {\n  #footer {\n    display: none;\n  }\n}\n";
        let diagnostics = check_scss(&NoIdSelectorsRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_id_nested_in_id() {
        let input = "#app {\n  #main {\n  }\n}\n";
        let diagnostics = check_scss(&NoIdSelectorsRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("inside another ID"));
    }
}
