use thiserror::Error;

use crate::text::offset_to_line_col;

/// The input is not a stylesheet the parser can read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = offset_to_line_col(input, offset);
        Self {
            message: message.into(),
            offset,
            line,
            column,
        }
    }
}
