use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Grouped selectors share one line and are separated by `, `.
pub struct SelectorGroupingRule;

impl Rule for SelectorGroupingRule {
    fn name(&self) -> &'static str {
        "selector-grouping"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Rule]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let StyleNode::Rule(rule) = node else {
            return Ok(Vec::new());
        };
        if rule.selectors.len() < 2 {
            return Ok(Vec::new());
        }

        let expected = rule
            .selectors
            .iter()
            .map(|s| collapse_whitespace(&s.text))
            .collect::<Vec<_>>()
            .join(", ");
        let actual = &cx.source[rule.prelude];
        if actual == expected {
            return Ok(Vec::new());
        }

        let message = if actual.contains('\n') {
            "Grouped selectors should be on a single line"
        } else {
            "Separate grouped selectors with `, `"
        };
        let location = Location::from_range(rule.prelude, cx.source);
        let diagnostic = Diagnostic::warning(location, self.name(), message).with_fix(Fix::single(
            "Join selectors with `, `",
            rule.prelude,
            expected,
        ));
        Ok(vec![diagnostic])
    }
}

/// Collapse runs of whitespace between compounds to one space. Strings,
/// attribute selectors and pseudo-class arguments are copied verbatim.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut escaped = false;
    let mut pending_space = false;

    for c in text.chars() {
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            out.push(c);
            match c {
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        if depth == 0 && c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;

        match c {
            '\\' => escaped = true,
            '"' | '\'' => quote = Some(c),
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push(c);
    }

    out
}
