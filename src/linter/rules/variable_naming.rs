use std::sync::LazyLock;

use regex::Regex;
use scuff_parser::{NodeKind, StyleNode, Syntax};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

static DASH_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$_?[a-z][a-z0-9-]*$").expect("variable name pattern is valid")
});

/// Sass variables are dash-case. A leading `_` marks a file-private variable.
pub struct VariableNamingRule;

impl Rule for VariableNamingRule {
    fn name(&self) -> &'static str {
        "variable-naming"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::VariableDeclaration]
    }

    fn syntaxes(&self) -> &'static [Syntax] {
        &[Syntax::Scss]
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let StyleNode::VariableDeclaration(var) = node else {
            return Ok(Vec::new());
        };
        if DASH_CASE.is_match(&var.name) {
            return Ok(Vec::new());
        }

        let suggestion = to_dash_case(&var.name);
        let message = if suggestion != var.name && DASH_CASE.is_match(&suggestion) {
            format!("Variable `{}` should be dash-case: `{}`", var.name, suggestion)
        } else {
            format!("Variable `{}` should be dash-case", var.name)
        };

        Ok(vec![Diagnostic::warning(
            Location::from_range(var.name_range, cx.source),
            self.name(),
            message,
        )])
    }
}

fn to_dash_case(name: &str) -> String {
    let body = name.strip_prefix('$').unwrap_or(name);
    let (private, body) = match body.strip_prefix('_') {
        Some(rest) => ("_", rest),
        None => ("", body),
    };

    let mut out = String::with_capacity(name.len() + 4);
    out.push('$');
    out.push_str(private);

    let mut prev: Option<char> = None;
    for c in body.chars() {
        if c.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push('-');
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
