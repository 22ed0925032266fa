use std::collections::BTreeMap;

use scuff_parser::{NodeKind, StyleNode, TextRange};

use crate::linter::diagnostics::{Diagnostic, Location, Severity};
use crate::linter::rules::{Rule, RuleCheckError, RuleContext};

/// Brightness level of a palette variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Lighter,
    Light,
    Base,
    Dark,
    Darker,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Lighter,
        Tier::Light,
        Tier::Base,
        Tier::Dark,
        Tier::Darker,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Tier::Lighter => "lighter",
            Tier::Light => "light",
            Tier::Base => "base",
            Tier::Dark => "dark",
            Tier::Darker => "darker",
        }
    }
}

/// The variables of one color family found in a palette file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVariantGroup {
    pub family: String,
    /// `$` for Sass variables, `--` for custom properties.
    pub sigil: &'static str,
    /// Range of the family's first variable in the file.
    pub first: TextRange,
    pub tiers: BTreeMap<Tier, TextRange>,
}

impl ColorVariantGroup {
    pub fn is_complete(&self) -> bool {
        self.missing_tiers().is_empty()
    }

    pub fn missing_tiers(&self) -> Vec<Tier> {
        Tier::ALL
            .into_iter()
            .filter(|tier| !self.tiers.contains_key(tier))
            .collect()
    }

    /// Variable name of `tier` in this family, e.g. `$blue-dark`.
    pub fn variable(&self, tier: Tier) -> String {
        match tier {
            Tier::Base => format!("{}{}", self.sigil, self.family),
            _ => format!("{}{}-{}", self.sigil, self.family, tier.suffix()),
        }
    }
}

/// Split a variable name into family and tier: `$blue-dark` is the `dark`
/// tier of `blue`, `$_blue` the base tier. Custom properties (`--blue-dark`)
/// split the same way.
pub fn split_tier(name: &str) -> (&str, Tier) {
    let name = name.strip_prefix("--").unwrap_or(name);
    let name = name.trim_start_matches('$');
    let name = name.strip_prefix('_').unwrap_or(name);

    // Longer suffixes first so `-darker` is not read as `-dark`.
    for tier in [Tier::Lighter, Tier::Darker, Tier::Light, Tier::Dark] {
        if let Some(family) = name
            .strip_suffix(tier.suffix())
            .and_then(|rest| rest.strip_suffix('-'))
            && !family.is_empty()
        {
            return (family, tier);
        }
    }
    (name, Tier::Base)
}

/// Palette variables in document order: top-level Sass variables and the
/// custom properties of top-level `:root` rules.
fn palette_variables(stylesheet: &StyleNode) -> Vec<(&str, TextRange, &'static str)> {
    let mut vars = Vec::new();

    for child in stylesheet.children() {
        match child {
            StyleNode::VariableDeclaration(var) => vars.push((var.name.as_str(), var.range, "$")),
            StyleNode::Rule(rule) if rule.selectors.iter().all(|s| s.text == ":root") => {
                vars.extend(rule.block.children.iter().filter_map(|node| match node {
                    StyleNode::Declaration(decl) if decl.property.starts_with("--") => {
                        Some((decl.property.as_str(), decl.range, "--"))
                    }
                    _ => None,
                }));
            }
            _ => {}
        }
    }

    vars
}

/// Group the palette variables of a color file by family, in order of first
/// appearance.
pub fn color_groups(stylesheet: &StyleNode) -> Vec<ColorVariantGroup> {
    let mut groups: Vec<ColorVariantGroup> = Vec::new();

    for (name, range, sigil) in palette_variables(stylesheet) {
        let (family, tier) = split_tier(name);

        match groups.iter_mut().find(|g| g.family == family) {
            Some(group) => {
                group.tiers.entry(tier).or_insert(range);
            }
            None => groups.push(ColorVariantGroup {
                family: family.to_string(),
                sigil,
                first: range,
                tiers: BTreeMap::from([(tier, range)]),
            }),
        }
    }

    groups
}

/// Every color family in a palette file defines all five tiers.
pub struct ColorVariantsRule;

impl Rule for ColorVariantsRule {
    fn name(&self) -> &'static str {
        "color-variants"
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
        for group in color_groups(node) {
            for tier in group.missing_tiers() {
                let expected = group.variable(tier);
                diagnostics.push(Diagnostic::warning(
                    Location::from_range(group.first, cx.source),
                    self.name(),
                    format!(
                        "Color `{}` is missing its `{}` variant (`{}`)",
                        group.family,
                        tier.suffix(),
                        expected
                    ),
                ));
            }
        }

        Ok(diagnostics)
    }
}
