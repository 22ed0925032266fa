use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::color_variants::color_groups;
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Color families in a palette file appear in alphabetical order.
pub struct ColorOrderRule;

impl Rule for ColorOrderRule {
    fn name(&self) -> &'static str {
        "color-order"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Stylesheet]
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        if !cx.is_color_file() {
            return Ok(Vec::new());
        }

        let mut diagnostics = Vec::new();
        let mut highest: Option<String> = None;

        for group in color_groups(node) {
            if let Some(max) = highest.as_deref()
                && group.family.as_str() < max
            {
                diagnostics.push(Diagnostic::warning(
                    Location::from_range(group.first, cx.source),
                    self.name(),
                    format!(
                        "Color `{}` should come before `{}` (alphabetical order)",
                        group.family, max
                    ),
                ));
                continue;
            }
            highest = Some(group.family);
        }

        Ok(diagnostics)
    }
}
