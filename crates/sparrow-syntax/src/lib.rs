//! `sparrow-syntax` - Lexer, parser, and concrete syntax tree for Swift declarations.
//!
//! This crate provides the low-level syntactic analysis for Swift source code:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//!
//! # Design Principles
//!
//! The tree is built with the `rowan` library:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Trivia on the parent**: Nodes span exactly their first to last token
//!
//! # Example
//!
//! ```
//! use sparrow_syntax::lexer::{lex, TokenKind};
//!
//! let source = "let answer: Int = 42";
//! let tokens = lex(source);
//!
//! // Filter out whitespace to see the meaningful tokens
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::KwLet);
//! assert_eq!(meaningful[1].kind, TokenKind::Ident);
//! assert_eq!(meaningful[2].kind, TokenKind::Colon);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{
    next_significant_token, SwiftLanguage, SyntaxElement, SyntaxKind, SyntaxNode,
    SyntaxNodeExt, SyntaxToken, ViewMode,
};
