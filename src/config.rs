use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::error::ConfigError;

/// Which spelling of an empty border the stylesheet should use. Older
/// revisions of the conventions asked for `border: 0`, newer ones for
/// `border: none`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderZero {
    /// Require `border: none`
    #[default]
    None,
    /// Require `border: 0`
    Zero,
}

/// Per-rule override in the `[rules]` table.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuleLevel {
    Off,
    Warning,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Deepest allowed rule nesting; the top level counts as 1.
    pub max_nesting_depth: usize,
    pub border_zero: BorderZero,
    /// Globs naming the dedicated color palette files.
    pub color_files: GlobList,
    /// Globs of paths skipped when expanding directories.
    pub exclude: GlobList,
    pub rules: BTreeMap<String, RuleLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_nesting_depth: 3,
            border_zero: BorderZero::default(),
            color_files: GlobList::new(DEFAULT_COLOR_FILES.iter().copied()).unwrap_or_default(),
            exclude: GlobList::default(),
            rules: BTreeMap::new(),
        }
    }
}

const DEFAULT_COLOR_FILES: &[&str] = &[
    "**/_colors.scss",
    "**/colors.scss",
    "**/_colors.css",
    "**/colors.css",
];

impl Config {
    /// Override level for a rule, if the config sets one.
    pub fn rule_level(&self, rule: &str) -> Option<RuleLevel> {
        self.rules.get(rule).copied()
    }

    pub fn is_color_file(&self, path: &Path) -> bool {
        self.color_files.is_match(path)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }

    /// Reject rule ids the linter does not know. Globs are checked when the
    /// lists are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let known = crate::linter::rule_ids();
        if let Some(unknown) = self.rules.keys().find(|id| !known.contains(&id.as_str())) {
            return Err(ConfigError::UnknownRule(unknown.clone()));
        }
        Ok(())
    }
}

/// Glob patterns together with their compiled matcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct GlobList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl GlobList {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidGlob {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { patterns, set })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_match(&self, path: &Path) -> bool {
        !self.is_empty() && self.set.is_match(path)
    }
}

impl Default for GlobList {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }
}

impl TryFrom<Vec<String>> for GlobList {
    type Error = ConfigError;

    fn try_from(patterns: Vec<String>) -> Result<Self, Self::Error> {
        GlobList::new(patterns)
    }
}

const CANDIDATE_NAMES: &[&str] = &[".scuff.toml", "scuff.toml"];

/// Parse and validate a config document.
pub fn parse_config_str(s: &str, path: &Path) -> Result<Config, ConfigError> {
    let config = toml::from_str::<Config>(s).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    let p = base.join("scuff").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path
/// 2) walk up from start_dir: .scuff.toml, scuff.toml
/// 3) $XDG_CONFIG_HOME/scuff/config.toml or the platform config directory
/// 4) default config
///
/// A config file that is found but invalid is an error, not a fallthrough.
pub fn load(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        let cfg = read_config(&p)?;
        return Ok((cfg, Some(p)));
    }

    if let Some(p) = user_config_path() {
        let cfg = read_config(&p)?;
        return Ok((cfg, Some(p)));
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
