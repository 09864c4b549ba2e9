//! Grammar rules for Swift.
//!
//! This module contains the grammar rules organized by category:
//!
//! - `items.rs` - item lists, declaration dispatch, nominal types, `#if` blocks
//! - `attributes.rs` - attributes and declaration modifiers
//! - `functions.rs` - functions, initializers, subscripts, signatures, accessors
//! - `bindings.rs` - `var`/`let` pattern bindings
//! - `generics.rs` - generic parameters, where clauses, inheritance
//! - `types.rs` - type expressions
//! - `statements.rs` - statement shells and `switch`
//! - `patterns.rs` - case, catch and binding patterns
//! - `expressions.rs` - balanced expression runs and closures

mod attributes;
mod bindings;
mod expressions;
mod functions;
mod generics;
mod items;
mod patterns;
mod statements;
mod types;

use crate::lexer::TokenKind;

pub(crate) use expressions::ExprContext;
pub(crate) use items::ItemContext;

/// Tokens usable as a member name after `.` or as an attribute name.
fn is_name_like(kind: TokenKind) -> bool {
    kind == TokenKind::Ident || kind.is_keyword()
}
