use std::path::Path;

use scuff_parser::{StyleNode, Syntax};

use crate::config::{Config, RuleLevel};
use crate::linter::collector::DiagnosticCollector;
use crate::linter::diagnostics::{Diagnostic, Severity};
use crate::linter::rules::{Rule, RuleRegistry};
use crate::linter::walker::Walker;

pub struct LintRunner {
    registry: RuleRegistry,
}

impl LintRunner {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn run(
        &self,
        tree: &StyleNode,
        input: &str,
        syntax: Syntax,
        path: Option<&Path>,
        config: &Config,
    ) -> Vec<Diagnostic> {
        let active: Vec<&dyn Rule> = self
            .registry
            .rules()
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| {
                let off = config.rule_level(rule.name()) == Some(RuleLevel::Off);
                if off {
                    log::debug!("Skipping disabled lint rule: {}", rule.name());
                }
                !off
            })
            .collect();

        log::debug!(
            "Running {} lint rule(s) on {}",
            active.len(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<input>".to_string())
        );

        let mut collector = DiagnosticCollector::new();
        for mut diagnostic in Walker::new(tree, &active, input, syntax, path, config) {
            match config.rule_level(&diagnostic.code) {
                Some(RuleLevel::Error) => diagnostic.severity = Severity::Error,
                Some(RuleLevel::Warning) => diagnostic.severity = Severity::Warning,
                _ => {}
            }
            collector.push(diagnostic);
        }

        log::debug!("Found {} diagnostic(s)", collector.len());
        collector.into_sorted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config_str;
    use crate::linter::default_registry;
    use scuff_parser::parse;

    fn run(input: &str, config: &Config) -> Vec<Diagnostic> {
        let tree = parse(input, Syntax::Scss).unwrap().into_node();
        LintRunner::new(default_registry()).run(&tree, input, Syntax::Scss, None, config)
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let input = ".a{\n  color: red;\n}\n";
        assert!(run(input, &Config::default()).iter().any(|d| d.code == "brace-spacing"));

        let config = parse_config_str(
            "[rules]\nbrace-spacing = \"off\"\n",
            Path::new("scuff.toml"),
        )
        .unwrap();
        assert!(!run(input, &config).iter().any(|d| d.code == "brace-spacing"));
    }

    #[test]
    fn test_severity_override() {
        let input = "#page .title {\n  color: red;\n}\n";
        let config = parse_config_str(
            "[rules]\nno-id-selectors = \"error\"\n",
            Path::new("scuff.toml"),
        )
        .unwrap();

        let diagnostics = run(input, &config);
        let id = diagnostics
            .iter()
            .find(|d| d.code == "no-id-selectors")
            .unwrap();
        assert_eq!(id.severity, Severity::Error);
    }

    #[test]
    fn test_diagnostics_are_sorted() {
        let input = ".b{\n  color:red;\n}\n.a{\n  top:0;\n}\n";
        let diagnostics = run(input, &Config::default());
        let positions: Vec<_> = diagnostics
            .iter()
            .map(|d| (d.location.line, d.location.column))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
