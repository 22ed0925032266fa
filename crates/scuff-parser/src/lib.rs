//! CSS and SCSS reader for the scuff linter.
//!
//! ```rust
//! use scuff_parser::{StyleNode, Syntax, parse};
//!
//! let sheet = parse(".btn {\n  color: red;\n}\n", Syntax::Scss).unwrap();
//! assert!(matches!(sheet.children[0], StyleNode::Rule(_)));
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod selector;
pub mod text;

pub use ast::{
    AtRule, Block, Comment, CommentKind, Declaration, NodeKind, RuleNode, Selector, StyleNode,
    Stylesheet, Syntax, VariableDeclaration,
};
pub use error::ParseError;
pub use parser::parse;
pub use rowan::{TextRange, TextSize};
