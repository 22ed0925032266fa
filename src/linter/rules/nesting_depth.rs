use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Rules may be nested at most `max_nesting_depth` levels deep, counting the
/// top level as one. Enclosing at-rules with a body count as a level.
pub struct NestingDepthRule;

impl Rule for NestingDepthRule {
    fn name(&self) -> &'static str {
        "nesting-depth"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
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

        let level = cx.nesting.depth + 1;
        let max = cx.config.max_nesting_depth;
        if level <= max {
            return Ok(Vec::new());
        }

        let location = Location::from_range(rule.prelude, cx.source);
        Ok(vec![Diagnostic::error(
            location,
            self.name(),
            format!("Rule is nested {level} levels deep, the maximum is {max}"),
        )])
    }
}
