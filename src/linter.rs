pub mod collector;
pub mod diagnostics;
pub mod rules;
pub mod runner;
pub mod walker;

use std::path::Path;

pub use collector::DiagnosticCollector;
pub use diagnostics::{Diagnostic, Edit, Fix, Location, Severity};
pub use rules::{NestingContext, Rule, RuleCheckError, RuleContext, RuleRegistry};
pub use runner::LintRunner;
pub use walker::Walker;

use scuff_parser::{StyleNode, Syntax};

use crate::config::Config;

/// Lint a parsed stylesheet with the built-in rules.
pub fn lint(
    tree: &StyleNode,
    input: &str,
    syntax: Syntax,
    path: Option<&Path>,
    config: &Config,
) -> Vec<Diagnostic> {
    let runner = LintRunner::new(default_registry());
    runner.run(tree, input, syntax, path, config)
}

/// Ids of all built-in rules, in registration order.
pub fn rule_ids() -> Vec<&'static str> {
    default_registry().rules().iter().map(|r| r.name()).collect()
}

/// Create the default rule registry with all built-in rules.
pub fn default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(rules::indentation::IndentationRule));
    registry.register(Box::new(rules::brace_spacing::BraceSpacingRule));
    registry.register(Box::new(rules::closing_brace::ClosingBraceRule));
    registry.register(Box::new(rules::colon_spacing::ColonSpacingRule));
    registry.register(Box::new(rules::trailing_semicolon::TrailingSemicolonRule));
    registry.register(Box::new(
        rules::blank_line_between_rules::BlankLineBetweenRulesRule,
    ));
    registry.register(Box::new(rules::selector_grouping::SelectorGroupingRule));
    registry.register(Box::new(rules::no_id_selectors::NoIdSelectorsRule));
    registry.register(Box::new(rules::nesting_depth::NestingDepthRule));
    registry.register(Box::new(
        rules::element_class_coupling::ElementClassCouplingRule,
    ));
    registry.register(Box::new(rules::declaration_order::DeclarationOrderRule));
    registry.register(Box::new(rules::variable_naming::VariableNamingRule));
    registry.register(Box::new(rules::color_variants::ColorVariantsRule));
    registry.register(Box::new(rules::color_order::ColorOrderRule));
    registry.register(Box::new(rules::border_zero::BorderZeroRule));
    registry
}
