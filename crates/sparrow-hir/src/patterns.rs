//! Classification of `case` patterns.
//!
//! A case item is tried against a fixed chain of shape recognizers; the
//! first that matches decides its [`CaseItem`]. Anything no recognizer
//! accepts is kept as [`CaseItem::Unsupported`].

mod classifier;
mod defs;

pub use classifier::classify;
pub use defs::{CaseItem, MatchedCase, SwitchCase, SwitchLabel};

pub(crate) use classifier::switch_case_from;
