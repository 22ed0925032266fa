//! Offset and line helpers shared by the parser and the lint rules.

use rowan::{TextRange, TextSize};

pub fn size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

pub fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(size(start), size(end))
}

/// Convert a byte offset to a 1-indexed (line, column) pair. Columns count
/// characters, not bytes.
pub fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in input.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}

/// Convert a byte offset to a 1-indexed line number.
pub fn offset_to_line(input: &str, offset: usize) -> usize {
    let offset = offset.min(input.len());
    input.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Byte offset where the line containing `offset` starts.
pub fn line_start(input: &str, offset: usize) -> usize {
    let offset = offset.min(input.len());
    input.as_bytes()[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|p| p + 1)
        .unwrap_or(0)
}

/// Text between the start of the line and `offset`, if it is only spaces and
/// tabs (i.e. `offset` is the first thing on its line).
pub fn leading_whitespace(input: &str, offset: usize) -> Option<&str> {
    let start = line_start(input, offset);
    let prefix = &input[start..offset];
    prefix
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
        .then_some(prefix)
}

pub fn is_first_on_line(input: &str, offset: usize) -> bool {
    leading_whitespace(input, offset).is_some()
}

/// Offset just past the last non-whitespace byte before `offset`.
pub fn skip_whitespace_back(input: &str, offset: usize) -> usize {
    let bytes = input.as_bytes();
    let mut pos = offset.min(bytes.len());
    while pos > 0 && bytes[pos - 1].is_ascii_whitespace() {
        pos -= 1;
    }
    pos
}

/// Offset just past the spaces and tabs preceding `offset` on the same line.
pub fn skip_blanks_back(input: &str, offset: usize) -> usize {
    let bytes = input.as_bytes();
    let mut pos = offset.min(bytes.len());
    while pos > 0 && matches!(bytes[pos - 1], b' ' | b'\t') {
        pos -= 1;
    }
    pos
}
