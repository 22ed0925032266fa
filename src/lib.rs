//! Style linter and autofixer for CSS and SCSS.
//!
//! ```rust
//! use scuff::{Config, Syntax, lint_source};
//!
//! let diagnostics = lint_source(".a{\n  color:red;\n}\n", Syntax::Scss, None, &Config::default()).unwrap();
//! assert!(diagnostics.iter().any(|d| d.code == "brace-spacing"));
//! ```

pub mod config;
pub mod error;
pub mod fixer;
pub mod linter;
pub mod reporter;
pub mod workspace;

use std::path::Path;

pub use config::Config;
pub use error::{ConfigError, Error};
pub use fixer::{FixReport, fix};
pub use linter::{Diagnostic, Severity};
pub use scuff_parser::{ParseError, StyleNode, Syntax};

/// Parse a stylesheet into its tree, rooted at a `Stylesheet` node.
pub fn parse(input: &str, syntax: Syntax) -> Result<StyleNode, ParseError> {
    scuff_parser::parse(input, syntax).map(|sheet| sheet.into_node())
}

/// Parse and lint `input`. `path` is used to recognize palette files.
pub fn lint_source(
    input: &str,
    syntax: Syntax,
    path: Option<&Path>,
    config: &Config,
) -> Result<Vec<Diagnostic>, ParseError> {
    let tree = parse(input, syntax)?;
    Ok(linter::lint(&tree, input, syntax, path, config))
}
