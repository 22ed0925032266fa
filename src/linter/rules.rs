use std::path::Path;

use scuff_parser::selector::compounds;
use scuff_parser::text::line_start;
use scuff_parser::{NodeKind, RuleNode, StyleNode, Syntax};
use thiserror::Error;

use crate::config::Config;
use crate::linter::diagnostics::{Diagnostic, Severity};

pub mod blank_line_between_rules;
pub mod border_zero;
pub mod brace_spacing;
pub mod closing_brace;
pub mod colon_spacing;
pub mod color_order;
pub mod color_variants;
pub mod declaration_order;
pub mod element_class_coupling;
pub mod indentation;
pub mod nesting_depth;
pub mod no_id_selectors;
pub mod selector_grouping;
pub mod trailing_semicolon;
pub mod variable_naming;

const ALL_SYNTAXES: &[Syntax] = &[Syntax::Css, Syntax::Scss];

pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn default_severity(&self) -> Severity;

    /// Node kinds the walker should hand to `check`.
    fn node_kinds(&self) -> &'static [NodeKind];

    fn syntaxes(&self) -> &'static [Syntax] {
        ALL_SYNTAXES
    }

    /// Whether the rule attaches fixes to its diagnostics.
    fn fixable(&self) -> bool {
        false
    }

    fn check(
        &self,
        node: &StyleNode,
        cx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>, RuleCheckError>;

    fn applies_to(&self, kind: NodeKind, syntax: Syntax) -> bool {
        self.node_kinds().contains(&kind) && self.syntaxes().contains(&syntax)
    }
}

/// A rule hit a condition it cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleCheckError {
    pub message: String,
}

impl RuleCheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Ambient state threaded through the walk. Each visited node sees the
/// context of its parent block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestingContext {
    /// Number of enclosing rules and at-rules with a body. Top-level nodes
    /// are at depth 0.
    pub depth: usize,
    /// Number of enclosing rules (at-rules excluded).
    pub rule_depth: usize,
    pub inside_id: bool,
    pub inside_media: bool,
    /// The enclosing rule only targets `js-` hook classes.
    pub inside_js_hook: bool,
    /// Indentation of the line the enclosing block opens on, `None` at the top
    /// level.
    pub parent_indent: Option<usize>,
}

impl NestingContext {
    /// Context for the children of `node`.
    pub fn enter(&self, node: &StyleNode, source: &str) -> NestingContext {
        let mut next = *self;

        match node {
            StyleNode::Rule(rule) => {
                next.depth += 1;
                next.rule_depth += 1;
                next.inside_id |= has_id_selector(rule);
                next.inside_js_hook = is_js_hook_rule(rule);
            }
            StyleNode::AtRule(at_rule) if at_rule.block.is_some() => {
                next.depth += 1;
                next.inside_media |= at_rule.name.eq_ignore_ascii_case("media");
            }
            _ => return next,
        }

        next.parent_indent = Some(line_indent(source, node.range().start().into()));
        next
    }
}

pub struct RuleContext<'a> {
    pub source: &'a str,
    pub syntax: Syntax,
    pub config: &'a Config,
    pub path: Option<&'a Path>,
    pub nesting: NestingContext,
    pub parent: Option<&'a StyleNode>,
    pub siblings: &'a [StyleNode],
    pub sibling_index: usize,
}

impl<'a> RuleContext<'a> {
    pub fn previous_sibling(&self) -> Option<&'a StyleNode> {
        self.sibling_index
            .checked_sub(1)
            .and_then(|i| self.siblings.get(i))
    }

    /// Indentation a child of the current block should have.
    pub fn expected_indent(&self) -> usize {
        self.nesting
            .parent_indent
            .map(|indent| indent + self.config.indent_width)
            .unwrap_or(0)
    }

    pub fn is_color_file(&self) -> bool {
        self.path.is_some_and(|p| self.config.is_color_file(p))
    }
}

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Width of the leading whitespace on the line containing `offset`.
pub(crate) fn line_indent(source: &str, offset: usize) -> usize {
    let start = line_start(source, offset);
    source[start..]
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count()
}

pub(crate) fn has_id_selector(rule: &RuleNode) -> bool {
    rule.selectors
        .iter()
        .any(|s| compounds(&s.text).iter().any(|c| !c.ids.is_empty()))
}

/// Every selector of the rule targets a `js-` hook class. Such rules mark
/// behavior, not presentation, and are skipped by the declaration rules.
pub fn is_js_hook_rule(rule: &RuleNode) -> bool {
    rule.selectors.iter().all(|s| {
        compounds(&s.text)
            .iter()
            .any(|c| c.classes.iter().any(|class| class.starts_with("js-")))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use scuff_parser::{Syntax, parse};

    use crate::config::Config;
    use crate::linter::diagnostics::Diagnostic;
    use crate::linter::rules::Rule;
    use crate::linter::walker::Walker;

    /// Run a single rule over `input`.
    pub fn check_with(
        rule: &dyn Rule,
        input: &str,
        syntax: Syntax,
        path: Option<&Path>,
        config: &Config,
    ) -> Vec<Diagnostic> {
        let tree = parse(input, syntax).unwrap().into_node();
        let rules = [rule];
        Walker::new(&tree, &rules, input, syntax, path, config).collect()
    }

    pub fn check_scss(rule: &dyn Rule, input: &str) -> Vec<Diagnostic> {
        check_with(rule, input, Syntax::Scss, None, &Config::default())
    }

    /// Apply every fix in `diagnostics` to `input`.
    pub fn apply(input: &str, diagnostics: &[Diagnostic]) -> String {
        crate::fixer::apply_fixes(input, diagnostics).output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scuff_parser::{Syntax, parse};

    fn first_rule(input: &str) -> RuleNode {
        let sheet = parse(input, Syntax::Scss).unwrap();
        match sheet.children.into_iter().next() {
            Some(StyleNode::Rule(rule)) => rule,
            _ => panic!("expected a rule"),
        }
    }

    #[test]
    fn test_js_hook_detection() {
        assert!(is_js_hook_rule(&first_rule(".js-toggle { }")));
        assert!(is_js_hook_rule(&first_rule(".js-a, .menu .js-b { }")));
        assert!(!is_js_hook_rule(&first_rule(".js-a, .menu { }")));
        assert!(!is_js_hook_rule(&first_rule(".toggle { }")));
    }

    #[test]
    fn test_enter_tracks_depth_and_indent() {
        let input = ".a {\n  @media print {\n    .b { }\n  }\n}";
        let sheet = parse(input, Syntax::Scss).unwrap().into_node();
        let root = NestingContext::default();

        let rule = &sheet.children()[0];
        let in_rule = root.enter(rule, input);
        assert_eq!(in_rule.depth, 1);
        assert_eq!(in_rule.rule_depth, 1);
        assert_eq!(in_rule.parent_indent, Some(0));

        let media = &rule.children()[0];
        let in_media = in_rule.enter(media, input);
        assert_eq!(in_media.depth, 2);
        assert_eq!(in_media.rule_depth, 1);
        assert!(in_media.inside_media);
        assert_eq!(in_media.parent_indent, Some(2));
    }
}
