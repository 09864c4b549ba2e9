//! Classification of type expressions.
//!
//! This module maps type syntax onto the closed [`EntityType`] shapes and
//! resolves parameters, tuple elements and associated values into
//! [`Parameter`] values.

mod defs;
mod resolver;

pub use defs::{ClosureType, EntityType, Parameter, SurfaceForm};
pub use resolver::{classify, parameter_from_enum_case, parameter_from_syntax, parameters_of};
