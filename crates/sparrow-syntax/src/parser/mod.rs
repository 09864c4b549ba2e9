//! Parser for Swift declarations.
//!
//! This module provides a hand-written recursive descent parser that builds
//! a lossless concrete syntax tree (CST) using the `rowan` library.
//!
//! # Design
//!
//! - **Error-tolerant**: Continues parsing after errors; tokens that cannot be
//!   placed are wrapped in `Unexpected` nodes
//! - **Lossless**: Preserves all source text including whitespace and comments
//! - **Declaration-first**: Declarations, types and patterns get full structure;
//!   other expressions are kept as balanced token runs
//!
//! # Architecture
//!
//! The parser uses a three-phase approach:
//!
//! 1. **Lexing**: Tokenize source text (see `lexer` module)
//! 2. **Parsing**: Build a flat stream of events (start node, add token, finish node)
//! 3. **Tree Building**: Convert events into a `rowan` green tree

#![allow(clippy::module_inception)]

pub mod event;
mod grammar;
mod parser;
mod sink;
mod source;

pub use parser::parse;
pub(crate) use parser::{CompletedMarker, Marker, Parser};

use crate::syntax::SyntaxNode;

/// Result of parsing source text.
#[derive(Debug, Clone)]
pub struct Parse {
    /// The root syntax node.
    green_node: rowan::GreenNode,
    /// Parsing errors.
    errors: Vec<ParseError>,
}

impl Parse {
    /// Returns the root syntax node.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green_node.clone())
    }

    /// Returns the green root, shared by every `SyntaxNode` built from it.
    #[must_use]
    pub fn green(&self) -> &rowan::GreenNode {
        &self.green_node
    }

    /// Returns the parsing errors.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if parsing produced no errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Renders the tree with one node or non-trivia token per line.
    #[must_use]
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        render(&self.syntax(), &mut out, 0);
        out
    }
}

fn render(node: &SyntaxNode, out: &mut String, depth: usize) {
    use std::fmt::Write;

    let _ = writeln!(
        out,
        "{}{:?}@{:?}",
        "  ".repeat(depth),
        node.kind(),
        node.text_range()
    );
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(child) => render(&child, out, depth + 1),
            rowan::NodeOrToken::Token(token) if !token.kind().is_trivia() => {
                let _ = writeln!(
                    out,
                    "{}{:?}@{:?} {:?}",
                    "  ".repeat(depth + 1),
                    token.kind(),
                    token.text_range(),
                    token.text()
                );
            }
            rowan::NodeOrToken::Token(_) => {}
        }
    }
}

/// A parsing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The byte range where the error occurred.
    pub range: text_size::TextRange,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

impl std::error::Error for ParseError {}
