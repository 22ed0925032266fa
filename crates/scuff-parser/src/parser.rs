//! Recursive descent reader for CSS and SCSS.
//!
//! The reader works statement by statement: it scans ahead to the first
//! top-level `{`, `;` or `}` (skipping strings, parentheses, comments and
//! `#{...}` interpolation) and decides from the terminator whether it is
//! looking at a rule, a declaration or the end of a block.

use crate::ast::{
    AtRule, Block, Comment, CommentKind, Declaration, RuleNode, Selector, StyleNode, Stylesheet,
    Syntax, VariableDeclaration,
};
use crate::error::ParseError;
use crate::text::{range, size};

/// Deepest block nesting the reader accepts. Deeper input is rejected with a
/// parse error instead of exhausting the stack.
pub const MAX_BLOCK_DEPTH: usize = 128;

/// Parse a complete stylesheet.
pub fn parse(input: &str, syntax: Syntax) -> Result<Stylesheet, ParseError> {
    let mut parser = Parser::new(input, syntax);
    let children = parser.parse_items(None)?;
    log::debug!(
        "Parsed {} top-level node(s) as {}",
        children.len(),
        syntax.name()
    );

    Ok(Stylesheet {
        children,
        range: range(0, input.len()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    OpenBrace,
    Semicolon,
    CloseBrace,
    Eof,
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    syntax: Syntax,
    /// Number of blocks currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, syntax: Syntax) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            syntax,
            depth: 0,
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(self.input, offset, message)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Parse statements until the `}` closing the block opened at `open`, or
    /// until end of input at the top level. The closing brace is not consumed.
    fn parse_items(&mut self, open: Option<usize>) -> Result<Vec<StyleNode>, ParseError> {
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(byte) = self.peek() else {
                if let Some(open) = open {
                    return Err(self.error(open, "unclosed `{`"));
                }
                return Ok(items);
            };

            match byte {
                b'}' => {
                    if open.is_some() {
                        return Ok(items);
                    }
                    return Err(self.error(self.pos, "unexpected `}`"));
                }
                // Empty statement
                b';' => self.pos += 1,
                b'/' if self.at("/*") => items.push(self.parse_block_comment()?),
                b'/' if self.at("//") => {
                    if self.syntax == Syntax::Css {
                        return Err(self.error(self.pos, "`//` comments are not valid CSS"));
                    }
                    items.push(self.parse_line_comment());
                }
                b'@' => items.push(self.parse_at_rule()?),
                b'$' => {
                    if self.syntax == Syntax::Css {
                        return Err(self.error(self.pos, "Sass variables are not valid CSS"));
                    }
                    items.push(self.parse_variable()?);
                }
                _ => items.push(self.parse_rule_or_declaration(open.is_some())?),
            }
        }
    }

    /// Find the first top-level `{`, `;` or `}` at or after `from`.
    fn scan_statement_end(&self, from: usize) -> Result<(usize, Terminator), ParseError> {
        let bytes = self.bytes;
        let mut i = from;
        let mut parens = 0usize;
        let mut brackets = 0usize;
        let mut interpolation = 0usize;

        while i < bytes.len() {
            let nested = parens > 0 || brackets > 0;
            match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.skip_string(i)?;
                    continue;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    i = self.skip_block_comment(i)?;
                    continue;
                }
                b'#' if bytes.get(i + 1) == Some(&b'{') => {
                    interpolation += 1;
                    i += 2;
                    continue;
                }
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b'[' => brackets += 1,
                b']' => brackets = brackets.saturating_sub(1),
                b'{' if interpolation > 0 => interpolation += 1,
                b'}' if interpolation > 0 => interpolation -= 1,
                b'{' if !nested => return Ok((i, Terminator::OpenBrace)),
                b'}' if !nested => return Ok((i, Terminator::CloseBrace)),
                b';' if !nested => return Ok((i, Terminator::Semicolon)),
                _ => {}
            }
            i += 1;
        }

        Ok((bytes.len(), Terminator::Eof))
    }

    fn skip_string(&self, start: usize) -> Result<usize, ParseError> {
        let quote = self.bytes[start];
        let mut i = start + 1;

        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => break,
                b if b == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }

        Err(self.error(start, "unterminated string"))
    }

    fn skip_block_comment(&self, start: usize) -> Result<usize, ParseError> {
        self.input[start + 2..]
            .find("*/")
            .map(|p| start + 2 + p + 2)
            .ok_or_else(|| self.error(start, "unterminated comment"))
    }

    fn parse_block_comment(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        let end = self.skip_block_comment(start)?;
        self.pos = end;

        Ok(StyleNode::Comment(Comment {
            kind: CommentKind::Block,
            text: self.input[start + 2..end - 2].to_string(),
            range: range(start, end),
        }))
    }

    fn parse_line_comment(&mut self) -> StyleNode {
        let start = self.pos;
        let line_end = self.input[start..]
            .find('\n')
            .map(|p| start + p)
            .unwrap_or(self.input.len());
        let end = start + self.input[start..line_end].trim_end().len();
        self.pos = line_end;

        StyleNode::Comment(Comment {
            kind: CommentKind::Line,
            text: self.input[start + 2..end].to_string(),
            range: range(start, end),
        })
    }

    fn parse_rule_or_declaration(&mut self, in_block: bool) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        let (end, terminator) = self.scan_statement_end(start)?;

        match terminator {
            Terminator::OpenBrace => self.parse_rule(start, end),
            _ if in_block => self.parse_declaration(start, end, terminator),
            _ => Err(self.error(start, "expected `{` after selector")),
        }
    }

    fn parse_rule(&mut self, start: usize, brace: usize) -> Result<StyleNode, ParseError> {
        let prelude_end = start + self.input[start..brace].trim_end().len();
        let selectors = self.split_selectors(start, prelude_end)?;
        let block = self.parse_block(brace)?;
        let end = usize::from(block.close) + 1;

        Ok(StyleNode::Rule(RuleNode {
            selectors,
            prelude: range(start, prelude_end),
            block,
            range: range(start, end),
        }))
    }

    fn split_selectors(&self, start: usize, end: usize) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = Vec::new();
        let mut piece_start = start;
        let mut depth = 0usize;
        let mut i = start;

        while i < end {
            match self.bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.skip_string(i)?;
                    continue;
                }
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    selectors.push(self.selector(piece_start, i)?);
                    piece_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        selectors.push(self.selector(piece_start, end)?);

        Ok(selectors)
    }

    fn selector(&self, start: usize, end: usize) -> Result<Selector, ParseError> {
        let (text, s, e) = trimmed_span(self.input, start, end);
        if text.is_empty() {
            return Err(self.error(start, "empty selector"));
        }
        Ok(Selector {
            text: text.to_string(),
            range: range(s, e),
        })
    }

    fn parse_block(&mut self, open: usize) -> Result<Block, ParseError> {
        if self.depth >= MAX_BLOCK_DEPTH {
            return Err(self.error(
                open,
                format!("nesting too deep (more than {MAX_BLOCK_DEPTH} levels)"),
            ));
        }

        self.depth += 1;
        self.pos = open + 1;
        let children = self.parse_items(Some(open))?;
        let close = self.pos;
        self.pos += 1;
        self.depth -= 1;

        Ok(Block {
            open: size(open),
            close: size(close),
            children,
        })
    }

    fn parse_declaration(
        &mut self,
        start: usize,
        end: usize,
        terminator: Terminator,
    ) -> Result<StyleNode, ParseError> {
        let segment = &self.input[start..end];
        let colon_rel = find_top_level_colon(segment)
            .ok_or_else(|| self.error(start, "expected `:` in declaration"))?;
        let property = segment[..colon_rel].trim_end();
        if property.is_empty() {
            return Err(self.error(start, "missing property name"));
        }

        let colon = start + colon_rel;
        let (value, value_start, value_end) = trimmed_span(self.input, colon + 1, end);
        let (semicolon, range_end) = self.finish_statement(end, terminator, colon, value_end);

        Ok(StyleNode::Declaration(Declaration {
            property: property.to_string(),
            property_range: range(start, start + property.len()),
            colon: size(colon),
            value: value.to_string(),
            value_range: range(value_start, value_end),
            semicolon,
            range: range(start, range_end),
        }))
    }

    fn parse_variable(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        let name_end = self.ident_end(start + 1);
        if name_end == start + 1 {
            return Err(self.error(start, "expected variable name after `$`"));
        }

        let (end, terminator) = self.scan_statement_end(name_end)?;
        if terminator == Terminator::OpenBrace {
            return Err(self.error(end, "unexpected `{` in variable declaration"));
        }

        let segment = &self.input[name_end..end];
        let rest = segment.trim_start();
        if !rest.starts_with(':') {
            return Err(self.error(name_end, "expected `:` after variable name"));
        }

        let colon = name_end + (segment.len() - rest.len());
        let (value, value_start, value_end) = trimmed_span(self.input, colon + 1, end);
        let (semicolon, range_end) = self.finish_statement(end, terminator, colon, value_end);

        Ok(StyleNode::VariableDeclaration(VariableDeclaration {
            name: self.input[start..name_end].to_string(),
            name_range: range(start, name_end),
            colon: size(colon),
            value: value.to_string(),
            value_range: range(value_start, value_end),
            semicolon,
            range: range(start, range_end),
        }))
    }

    fn parse_at_rule(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        let name_end = self.ident_end(start + 1);
        if name_end == start + 1 {
            return Err(self.error(start, "expected at-rule name"));
        }

        let (end, terminator) = self.scan_statement_end(name_end)?;
        let (params, params_start, params_end) = trimmed_span(self.input, name_end, end);
        let params_range = if params.is_empty() {
            range(name_end, name_end)
        } else {
            range(params_start, params_end)
        };

        let (block, semicolon, range_end) = match terminator {
            Terminator::OpenBrace => {
                let block = self.parse_block(end)?;
                let close = usize::from(block.close) + 1;
                (Some(block), None, close)
            }
            Terminator::Semicolon => {
                self.pos = end + 1;
                (None, Some(size(end)), end + 1)
            }
            Terminator::CloseBrace | Terminator::Eof => {
                self.pos = end;
                (None, None, usize::from(params_range.end()))
            }
        };

        Ok(StyleNode::AtRule(AtRule {
            name: self.input[start + 1..name_end].to_string(),
            params: params.to_string(),
            params_range,
            block,
            semicolon,
            range: range(start, range_end),
        }))
    }

    /// Consume the terminator of a `name: value` statement. Returns the
    /// semicolon offset (if any) and the end of the statement's range.
    fn finish_statement(
        &mut self,
        end: usize,
        terminator: Terminator,
        colon: usize,
        value_end: usize,
    ) -> (Option<rowan::TextSize>, usize) {
        if terminator == Terminator::Semicolon {
            self.pos = end + 1;
            return (Some(size(end)), end + 1);
        }

        self.pos = end;
        (None, value_end.max(colon + 1))
    }

    fn ident_end(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.bytes.len() && is_ident_byte(self.bytes[i]) {
            i += 1;
        }
        i
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

/// Trim `input[from..to]`, returning the trimmed text and its bounds. An
/// all-whitespace slice yields an empty span at `from`.
fn trimmed_span(input: &str, from: usize, to: usize) -> (&str, usize, usize) {
    let slice = &input[from..to];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return ("", from, from);
    }
    let lead = slice.len() - slice.trim_start().len();
    (trimmed, from + lead, from + lead + trimmed.len())
}

fn find_top_level_colon(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let mut interpolation = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' if bytes.get(i + 1) == Some(&b'{') => {
                interpolation += 1;
                i += 1;
            }
            b'}' if interpolation > 0 => interpolation -= 1,
            b':' if interpolation == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }

    None
}
