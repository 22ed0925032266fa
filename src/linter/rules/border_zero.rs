use scuff_parser::{NodeKind, StyleNode};

use crate::config::BorderZero;
use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

const BORDER_PROPERTIES: &[&str] = &[
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
];

/// An empty border is spelled one way throughout, `none` or `0` depending on
/// the `border_zero` setting.
pub struct BorderZeroRule;

impl Rule for BorderZeroRule {
    fn name(&self) -> &'static str {
        "border-zero"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let StyleNode::Declaration(decl) = node else {
            return Ok(Vec::new());
        };
        if cx.nesting.inside_js_hook {
            return Ok(Vec::new());
        }

        let property = decl.property.to_ascii_lowercase();
        if !BORDER_PROPERTIES.contains(&property.as_str()) {
            return Ok(Vec::new());
        }

        let (wrong, preferred) = match cx.config.border_zero {
            BorderZero::None => ("0", "none"),
            BorderZero::Zero => ("none", "0"),
        };
        if !decl.value.eq_ignore_ascii_case(wrong) {
            return Ok(Vec::new());
        }

        let location = Location::from_range(decl.value_range, cx.source);
        let diagnostic = Diagnostic::warning(
            location,
            self.name(),
            format!("Use `{}: {}` instead of `{}`", decl.property, preferred, wrong),
        )
        .with_fix(Fix::single(
            format!("Replace `{wrong}` with `{preferred}`"),
            decl.value_range,
            preferred,
        ));
        Ok(vec![diagnostic])
    }
}
