use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the run's setup. Reported before any file is linted and
/// abort the whole run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
    #[error("unknown rule `{0}` in [rules]")]
    UnknownRule(String),
    #[error("invalid glob `{pattern}`: {message}")]
    InvalidGlob { pattern: String, message: String },
    #[error("{}: the indented `.sass` syntax is not supported, convert the file to `.scss`", .0.display())]
    IndentedSyntax(PathBuf),
    #[error("{}: unsupported file type, expected `.css` or `.scss`", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("{}: not found", .0.display())]
    MissingInput(PathBuf),
}

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
