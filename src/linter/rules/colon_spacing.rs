use scuff_parser::text::range;
use scuff_parser::{NodeKind, StyleNode, TextRange, TextSize};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

pub struct ColonSpacingRule;

impl Rule for ColonSpacingRule {
    fn name(&self) -> &'static str {
        "colon-spacing"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration, NodeKind::VariableDeclaration]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let (name_end, colon, value) = match node {
            StyleNode::Declaration(decl) => (decl.property_range.end(), decl.colon, decl.value_range),
            StyleNode::VariableDeclaration(var) => (var.name_range.end(), var.colon, var.value_range),
            _ => return Ok(Vec::new()),
        };
        if value.is_empty() {
            return Ok(Vec::new());
        }

        let Some(message) = spacing_problem(cx.source, name_end, colon, value) else {
            return Ok(Vec::new());
        };

        let colon: usize = colon.into();
        let location = Location::from_range(range(colon, colon + 1), cx.source);
        let diagnostic = Diagnostic::error(location, self.name(), message).with_fix(Fix::single(
            "Use `: ` between name and value",
            TextRange::new(name_end, value.start()),
            ": ",
        ));
        Ok(vec![diagnostic])
    }
}

fn spacing_problem(
    source: &str,
    name_end: TextSize,
    colon: TextSize,
    value: TextRange,
) -> Option<&'static str> {
    let before = &source[TextRange::new(name_end, colon)];
    let after = &source[TextRange::new(colon + TextSize::from(1), value.start())];

    if !before.is_empty() {
        Some("Unexpected whitespace before `:`")
    } else if after.is_empty() {
        Some("Missing space after `:`")
    } else if after != " " {
        Some("Expected exactly one space after `:`")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::{apply, check_scss};

    #[test]
    fn test_clean() {
        let input = "$gap: 4px;\n.a {\n  margin: $gap;\n}\n";
        assert!(check_scss(&ColonSpacingRule, input).is_empty());
    }

    #[test]
    fn test_missing_space_after() {
        let input = ".a {\n  color:red;\n}\n";
        let diagnostics = check_scss(&ColonSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Missing space"));
        assert_eq!((diagnostics[0].location.line, diagnostics[0].location.column), (2, 8));
        assert_eq!(apply(input, &diagnostics), ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn test_space_before() {
        let input = ".a {\n  color : red;\n}\n";
        let diagnostics = check_scss(&ColonSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("before"));
        assert_eq!(apply(input, &diagnostics), ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn test_variable_with_extra_space() {
        let input = "$primary:   #336699;\n";
        let diagnostics = check_scss(&ColonSpacingRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(apply(input, &diagnostics), "$primary: #336699;\n");
    }

    #[test]
    fn test_pseudo_selectors_are_not_declarations() {
        let input = "a:hover {\n  color: red;\n}\n";
        assert!(check_scss(&ColonSpacingRule, input).is_empty());
    }
}
