use scuff_parser::selector::compounds;
use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Flags compounds such as `ul.nav` that tie a class to an element type.
/// `js-` hook classes get no exemption here.
pub struct ElementClassCouplingRule;

impl Rule for ElementClassCouplingRule {
    fn name(&self) -> &'static str {
        "element-class-coupling"
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
            for compound in compounds(&selector.text) {
                let Some(element) = compound.element.as_deref() else {
                    continue;
                };
                if element == "*" || compound.classes.is_empty() {
                    continue;
                }
                diagnostics.push(Diagnostic::warning(
                    Location::from_range(selector.range, cx.source),
                    self.name(),
                    format!(
                        "Avoid qualifying class `.{}` with element `{}`",
                        compound.classes[0], element
                    ),
                ));
            }
        }

        Ok(diagnostics)
    }
}
