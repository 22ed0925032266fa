//! Stylesheet tree produced by the parser.
//!
//! Each node owns its children and carries the byte range it was read from.
//! Whitespace between nodes is not represented; rules that care about layout
//! go back to the source text through the ranges.

use rowan::{TextRange, TextSize};

/// Source syntax of a stylesheet, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    Css,
    Scss,
}

impl Syntax {
    /// Map a file extension to a syntax. The indented `.sass` syntax is not
    /// supported and yields `None` like any other unknown extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some(Syntax::Css),
            "scss" => Some(Syntax::Scss),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Syntax::Css => "css",
            Syntax::Scss => "scss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Stylesheet,
    Rule,
    AtRule,
    Declaration,
    Comment,
    VariableDeclaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    Stylesheet(Stylesheet),
    Rule(RuleNode),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
    VariableDeclaration(VariableDeclaration),
}

impl StyleNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            StyleNode::Stylesheet(_) => NodeKind::Stylesheet,
            StyleNode::Rule(_) => NodeKind::Rule,
            StyleNode::AtRule(_) => NodeKind::AtRule,
            StyleNode::Declaration(_) => NodeKind::Declaration,
            StyleNode::Comment(_) => NodeKind::Comment,
            StyleNode::VariableDeclaration(_) => NodeKind::VariableDeclaration,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            StyleNode::Stylesheet(n) => n.range,
            StyleNode::Rule(n) => n.range,
            StyleNode::AtRule(n) => n.range,
            StyleNode::Declaration(n) => n.range,
            StyleNode::Comment(n) => n.range,
            StyleNode::VariableDeclaration(n) => n.range,
        }
    }

    /// The `{ ... }` body of a rule or at-rule, if the node has one.
    pub fn block(&self) -> Option<&Block> {
        match self {
            StyleNode::Rule(n) => Some(&n.block),
            StyleNode::AtRule(n) => n.block.as_ref(),
            _ => None,
        }
    }

    /// Direct children in document order. Leaves return an empty slice.
    pub fn children(&self) -> &[StyleNode] {
        match self {
            StyleNode::Stylesheet(n) => &n.children,
            _ => self.block().map(|b| b.children.as_slice()).unwrap_or(&[]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub children: Vec<StyleNode>,
    pub range: TextRange,
}

impl Stylesheet {
    /// Wrap the stylesheet as a root node for traversal.
    pub fn into_node(self) -> StyleNode {
        StyleNode::Stylesheet(self)
    }
}

/// Braces and contents of a rule or at-rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Offset of the opening `{`.
    pub open: TextSize,
    /// Offset of the closing `}`.
    pub close: TextSize,
    pub children: Vec<StyleNode>,
}

/// A rule declaration: a selector group and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    pub selectors: Vec<Selector>,
    /// Everything between the start of the first selector and the end of the
    /// last one, trailing whitespace excluded.
    pub prelude: TextRange,
    pub block: Block,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub text: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    pub params: String,
    /// Range of the trimmed parameters. Empty (at the end of the name) when
    /// there are none.
    pub params_range: TextRange,
    pub block: Option<Block>,
    pub semicolon: Option<TextSize>,
    pub range: TextRange,
}

impl AtRule {
    /// End of the prelude: the last parameter byte, or the end of the name.
    pub fn prelude_end(&self) -> TextSize {
        self.params_range.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub property_range: TextRange,
    pub colon: TextSize,
    pub value: String,
    pub value_range: TextRange,
    pub semicolon: Option<TextSize>,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...` (SCSS only)
    Line,
    /// `/* ... */`
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub range: TextRange,
}

/// A Sass `$name: value;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    /// Name including the leading `$`.
    pub name: String,
    pub name_range: TextRange,
    pub colon: TextSize,
    pub value: String,
    pub value_range: TextRange,
    pub semicolon: Option<TextSize>,
    pub range: TextRange,
}
