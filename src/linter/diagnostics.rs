use std::fmt;

use rowan::TextRange;
use scuff_parser::text::offset_to_line_col;
use serde::Serialize;

/// Ordered so that `Error > Warning`, which is what `--severity` filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.pad("warning"),
            Severity::Error => f.pad("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: TextRange,
    pub replacement: String,
}

impl Edit {
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub message: String,
    pub edits: Vec<Edit>,
}

impl Fix {
    /// A fix consisting of a single edit.
    pub fn single(message: impl Into<String>, range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            edits: vec![Edit::replace(range, replacement)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
    /// Id of the rule that produced the diagnostic.
    pub code: String,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        location: Location,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
            code: code.into(),
            fix: None,
        }
    }

    pub fn error(location: Location, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, code, message)
    }

    pub fn warning(
        location: Location,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, location, code, message)
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.as_ref().is_some_and(|f| !f.edits.is_empty())
    }
}

impl Location {
    pub fn from_range(range: TextRange, input: &str) -> Self {
        let (line, column) = offset_to_line_col(input, range.start().into());

        Self {
            line,
            column,
            range,
        }
    }
}
