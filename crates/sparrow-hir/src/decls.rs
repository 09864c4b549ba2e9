//! Declaration values.
//!
//! One type per declaration kind. Each wraps its syntax node together with
//! the shared [`ExplorerContext`](crate::ExplorerContext) and resolves its
//! properties on first access.

/// Implements [`Declaration`] for kinds whose common properties come
/// straight from [`DeclCore`].
macro_rules! impl_declaration {
    ($($kind:ident),* $(,)?) => {
        $(
            impl $crate::decls::Declaration for $kind {
                fn core(&self) -> &$crate::decls::DeclCore {
                    &self.core
                }
            }
        )*
    };
}

mod base;
mod common;
mod control;
mod functions;
mod nominal;
mod operators;
mod values;

pub use base::{DeclCore, Declaration};
pub use common::{
    Accessor, AccessorKind, Attribute, AttributeArgument, EffectSpecifiers, GenericParameter,
    GenericRequirement, Modifier, RequirementRelation, Signature,
};
pub(crate) use common::{attributes_in, effects_in, initializer_text};
pub use control::{ConditionalCompilationBlock, IfConfigBranch, SwitchExpression};
pub use functions::{Deinitializer, Function, Initializer, Subscript};
pub use nominal::{Actor, AssociatedType, Class, EnumCase, Enumeration, Extension, Protocol, Structure};
pub use operators::{
    is_operator_character, is_operator_head, is_valid_identifier, Associativity, Operator,
    OperatorKind, PrecedenceGroup,
};
pub use values::{Import, TypeAlias, Variable};
