use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext, is_js_hook_rule};

/// Kinds of rule children, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Declarations,
    Includes,
    Modifiers,
    MediaQueries,
    NestedSelectors,
}

impl Category {
    /// Category of a rule child. Comments and at-rules other than
    /// `@extend`, `@include` and `@media` are unconstrained.
    pub fn of(node: &StyleNode) -> Option<Category> {
        match node {
            StyleNode::Declaration(_) | StyleNode::VariableDeclaration(_) => {
                Some(Category::Declarations)
            }
            StyleNode::AtRule(at_rule) => match at_rule.name.to_ascii_lowercase().as_str() {
                "extend" => Some(Category::Declarations),
                "include" => Some(Category::Includes),
                "media" => Some(Category::MediaQueries),
                _ => None,
            },
            StyleNode::Rule(rule) => {
                if rule.selectors.iter().all(|s| s.text.starts_with('&')) {
                    Some(Category::Modifiers)
                } else {
                    Some(Category::NestedSelectors)
                }
            }
            StyleNode::Comment(_) | StyleNode::Stylesheet(_) => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Category::Declarations => "declarations",
            Category::Includes => "`@include`s",
            Category::Modifiers => "`&` modifiers",
            Category::MediaQueries => "media queries",
            Category::NestedSelectors => "nested selectors",
        }
    }
}

/// Inside a rule: declarations, then includes, then `&` modifiers, then
/// media queries, then nested selectors.
pub struct DeclarationOrderRule;

impl Rule for DeclarationOrderRule {
    fn name(&self) -> &'static str {
        "declaration-order"
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
        if is_js_hook_rule(rule) {
            return Ok(Vec::new());
        }

        let mut diagnostics = Vec::new();
        let mut highest: Option<Category> = None;

        for child in &rule.block.children {
            let Some(category) = Category::of(child) else {
                continue;
            };
            match highest {
                Some(max) if category < max => {
                    diagnostics.push(Diagnostic::warning(
                        Location::from_range(child.range(), cx.source),
                        self.name(),
                        format!(
                            "{} should come before {}",
                            capitalize(category.label()),
                            max.label()
                        ),
                    ));
                }
                _ => highest = Some(category),
            }
        }

        Ok(diagnostics)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::check_scss;

    const ORDERED: &str = "\
.btn {
  @extend %control;
  color: red;
  @include rounded;
  &:hover {
    color: blue;
  }
  @media print {
    display: none;
  }
  .icon {
    top: 0;
  }
}
";

    #[test]
    fn test_correct_order() {
        assert!(check_scss(&DeclarationOrderRule, ORDERED).is_empty());
    }

    #[test]
    fn test_declaration_after_nested_selector() {
        let input = ".a {\n  .b {\n  }\n  color: red;\n}\n";
        let diagnostics = check_scss(&DeclarationOrderRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 4);
        assert_eq!(
            diagnostics[0].message,
            "Declarations should come before nested selectors"
        );
    }

    #[test]
    fn test_interleaving_is_caught() {
        // The include is not adjacent to the media query it follows.
        let input = ".a {\n  @media print {\n  }\n  color: red;\n  @include x;\n}\n";
        let diagnostics = check_scss(&DeclarationOrderRule, input);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].location.line, 4);
        assert_eq!(diagnostics[1].location.line, 5);
        assert!(diagnostics[1].message.contains("media queries"));
    }

    #[test]
    fn test_modifier_after_nested_selector() {
        let input = ".a {\n  .b {\n  }\n  &.is-open {\n  }\n}\n";
        let diagnostics = check_scss(&DeclarationOrderRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("`&` modifiers"));
    }

    #[test]
    fn test_comments_and_other_at_rules_are_ignored() {
        let input = ".a {\n  color: red;\n  // note\n  @debug 'x';\n  top: 0;\n}\n";
        assert!(check_scss(&DeclarationOrderRule, input).is_empty());
    }

    #[test]
    fn test_js_hooks_are_skipped() {
        let input = ".js-menu {\n  .b {\n  }\n  color: red;\n}\n";
        assert!(check_scss(&DeclarationOrderRule, input).is_empty());
    }
}
