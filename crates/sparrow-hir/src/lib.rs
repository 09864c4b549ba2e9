//! `sparrow-hir` - Semantic declaration model for Swift source.
//!
//! This crate turns the concrete syntax tree built by `sparrow-syntax` into
//! strongly typed declaration values:
//!
//! - **Declaration Collector**: One walk over the tree that sorts declaration
//!   nodes into per-kind sequences; nested declarations are collected lazily
//! - **Type Resolver**: Classifies type expressions into [`EntityType`]
//! - **Case Classifier**: Classifies `case` patterns into [`CaseItem`]
//! - **Declaration Resolvers**: Memoized accessors for names, modifiers,
//!   generics, signatures and the other properties of each kind
//!
//! # Architecture
//!
//! Every declaration owns its syntax node and an `Arc` of the shared
//! [`ExplorerContext`] (view mode, source buffer, location service, staleness
//! flag). Properties are computed on first access and cached for the lifetime
//! of the declaration. Nothing here type-checks: classification is purely
//! syntactic.
//!
//! # Example
//!
//! ```
//! use sparrow_hir::{collect_declarations_from_source, Declaration, ExplorerConfig, Function};
//!
//! let source = "func greet(_ name: String) -> String { name }";
//! let declarations = collect_declarations_from_source(source, &ExplorerConfig::default());
//!
//! let greet = &declarations.of_kind::<Function>()[0];
//! assert_eq!(greet.name(), "greet");
//! assert_eq!(greet.signature().input.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod context;
pub mod decls;
pub mod error;
pub mod explorer;
pub mod location;
pub mod patterns;
pub mod types;

pub use collector::{collect, collect_entering_at, DeclarationCollection, DeclarationKind};
pub use context::{ExplorerConfig, ExplorerContext};
pub use decls::*;
pub use error::{ConfigError, ExplorerError};
pub use explorer::{
    collect_declarations_from_node, collect_declarations_from_path,
    collect_declarations_from_source, location_of, SyntaxExplorer,
};
pub use location::{LocationService, SourceLocation};
pub use patterns::{CaseItem, MatchedCase, SwitchCase, SwitchLabel};
pub use types::{EntityType, Parameter, SurfaceForm};

pub use sparrow_syntax::ViewMode;
