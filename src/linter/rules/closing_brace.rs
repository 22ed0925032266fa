use scuff_parser::text::{leading_whitespace, line_start, range, skip_whitespace_back};
use scuff_parser::{NodeKind, StyleNode};

use crate::linter::diagnostics::{Diagnostic, Fix, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext, line_indent};

/// `}` sits alone on its line, aligned with the line its block opens on.
pub struct ClosingBraceRule;

impl Rule for ClosingBraceRule {
    fn name(&self) -> &'static str {
        "closing-brace"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Rule, NodeKind::AtRule]
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError> {
        let Some(block) = node.block() else {
            return Ok(Vec::new());
        };
        let close: usize = block.close.into();
        let expected = line_indent(cx.source, node.range().start().into());
        let indent = " ".repeat(expected);
        let location = Location::from_range(range(close, close + 1), cx.source);

        let diagnostic = match leading_whitespace(cx.source, close) {
            None => {
                let from = skip_whitespace_back(cx.source, close);
                Diagnostic::error(
                    location,
                    self.name(),
                    "Closing brace should be on its own line",
                )
                .with_fix(Fix::single(
                    "Move `}` to its own line",
                    range(from, close),
                    format!("\n{indent}"),
                ))
            }
            Some(found) if found != indent => Diagnostic::error(
                location,
                self.name(),
                format!(
                    "Closing brace should be indented {} space(s) to align with its block",
                    expected
                ),
            )
            .with_fix(Fix::single(
                "Align `}` with its block",
                range(line_start(cx.source, close), close),
                indent,
            )),
            Some(_) => return Ok(Vec::new()),
        };

        Ok(vec![diagnostic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::rules::test_support::{apply, check_scss};

    #[test]
    fn test_aligned_brace() {
        let input = ".a {\n  .b {\n    top: 0;\n  }\n}\n";
        assert!(check_scss(&ClosingBraceRule, input).is_empty());
    }

    #[test]
    fn test_inline_brace() {
        let input = ".a {\n  color: red; }\n";
        let diagnostics = check_scss(&ClosingBraceRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("own line"));
        assert_eq!(apply(input, &diagnostics), ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn test_misaligned_brace() {
        let input = ".a {\n  .b {\n    top: 0;\n}\n}\n";
        let diagnostics = check_scss(&ClosingBraceRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 4);
        assert_eq!(
            apply(input, &diagnostics),
            ".a {\n  .b {\n    top: 0;\n  }\n}\n"
        );
    }

    #[test]
    fn test_empty_block_on_one_line() {
        let input = ".a { }\n";
        let diagnostics = check_scss(&ClosingBraceRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(apply(input, &diagnostics), ".a {\n}\n");
    }
}
