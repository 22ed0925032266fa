use scuff_parser::text::{leading_whitespace, line_start, range, skip_blanks_back};
use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Every statement starts on its own line, indented by `indent_width`
/// spaces per nesting level. Tabs are rejected.
pub struct IndentationRule;

impl Rule for IndentationRule {
    fn name(&self) -> &'static str {
        "indentation"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Rule,
            NodeKind::AtRule,
            NodeKind::Declaration,
            NodeKind::Comment,
            NodeKind::VariableDeclaration,
        ]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let start: usize = node.range().start().into();
        let expected = cx.expected_indent();
        let indent = " ".repeat(expected);
        let location = Location::from_range(node.range(), cx.source);

        let Some(found) = leading_whitespace(cx.source, start) else {
            // Trailing comments share the line of the statement they annotate.
            if matches!(node, StyleNode::Comment(_)) {
                return Ok(Vec::new());
            }
            let from = skip_blanks_back(cx.source, start);
            let diagnostic = Diagnostic::error(
                location,
                self.name(),
                "Statement should start on its own line",
            )
            .with_fix(Fix::single(
                "Move statement to its own line",
                range(from, start),
                format!("\n{indent}"),
            ));
            return Ok(vec![diagnostic]);
        };

        let message = if found.contains('\t') {
            "Indent with spaces, not tabs".to_string()
        } else if found.len() != expected {
            format!(
                "Expected indentation of {} space(s), found {}",
                expected,
                found.len()
            )
        } else {
            return Ok(Vec::new());
        };

        let line = line_start(cx.source, start);
        let diagnostic = Diagnostic::error(location, self.name(), message).with_fix(Fix::single(
            format!("Indent with {expected} space(s)"),
            range(line, start),
            indent,
        ));
        Ok(vec![diagnostic])
    }
}
