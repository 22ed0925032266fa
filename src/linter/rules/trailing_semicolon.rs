use scuff_parser::{NodeKind, StyleNode, TextRange};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Statements end with `;`, including the last one in a block.
pub struct TrailingSemicolonRule;

impl Rule for TrailingSemicolonRule {
    fn name(&self) -> &'static str {
        "trailing-semicolon"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Declaration,
            NodeKind::VariableDeclaration,
            NodeKind::AtRule,
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
        let missing = match node {
            StyleNode::Declaration(decl) => decl.semicolon.is_none(),
            StyleNode::VariableDeclaration(var) => var.semicolon.is_none(),
            StyleNode::AtRule(at_rule) => at_rule.block.is_none() && at_rule.semicolon.is_none(),
            _ => false,
        };
        if !missing {
            return Ok(Vec::new());
        }

        let end = node.range().end();
        let location = Location::from_range(node.range(), cx.source);
        let diagnostic = Diagnostic::warning(location, self.name(), "Missing `;` after statement")
            .with_fix(Fix::single("Add `;`", TextRange::empty(end), ";"));
        Ok(vec![diagnostic])
    }
}
