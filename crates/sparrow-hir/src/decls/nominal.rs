//! Classes, structures, enumerations, actors, protocols and extensions.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt, ViewMode};

use super::base::{DeclCore, Declaration};
use super::common::{
    attributes_in, generic_parameters_in, generic_requirements_in, inheritance_in,
    initializer_text, modifiers_in, Attribute, GenericParameter, GenericRequirement, Modifier,
};
use crate::collector::DeclarationCollection;
use crate::context::ExplorerContext;
use crate::types::{classify, parameter_from_enum_case, EntityType, Parameter};

/// Lazily resolved parts every type-introducing declaration has.
#[derive(Default)]
struct TypeShape {
    generic_parameters: OnceCell<Vec<GenericParameter>>,
    generic_requirements: OnceCell<Vec<GenericRequirement>>,
    inheritance: OnceCell<Vec<SmolStr>>,
    members: OnceCell<DeclarationCollection>,
}

impl TypeShape {
    fn generic_parameters(&self, core: &DeclCore) -> &[GenericParameter] {
        self.generic_parameters
            .get_or_init(|| generic_parameters_in(core.syntax(), core.view_mode()))
    }

    fn generic_requirements(&self, core: &DeclCore) -> &[GenericRequirement] {
        self.generic_requirements
            .get_or_init(|| generic_requirements_in(core.syntax(), core.view_mode()))
    }

    fn inheritance(&self, core: &DeclCore) -> &[SmolStr] {
        self.inheritance
            .get_or_init(|| inheritance_in(core.syntax(), core.view_mode()))
    }

    fn members(&self, core: &DeclCore) -> &DeclarationCollection {
        self.members.get_or_init(|| {
            core.collect_below(core.syntax().child_of_kind(SyntaxKind::MemberBlock).as_ref())
        })
    }
}

macro_rules! nominal_type {
    ($(#[$meta:meta])* $kind:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        pub struct $kind {
            core: DeclCore,
            shape: TypeShape,
            $($field: OnceCell<$ty>,)*
        }

        impl $kind {
            pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
                Self {
                    core: DeclCore::new(node, ctx),
                    shape: TypeShape::default(),
                    $($field: OnceCell::new(),)*
                }
            }

            /// Parameters of the generic clause.
            #[must_use]
            pub fn generic_parameters(&self) -> &[GenericParameter] {
                self.shape.generic_parameters(&self.core)
            }

            /// Requirements from `where` clauses.
            #[must_use]
            pub fn generic_requirements(&self) -> &[GenericRequirement] {
                self.shape.generic_requirements(&self.core)
            }

            /// Inherited types and conformances, as written.
            #[must_use]
            pub fn inheritance(&self) -> &[SmolStr] {
                self.shape.inheritance(&self.core)
            }

            /// Declarations in the member block, collected on first access.
            #[must_use]
            pub fn members(&self) -> &DeclarationCollection {
                self.shape.members(&self.core)
            }
        }

        impl_declaration!($kind);

        impl PartialEq for $kind {
            fn eq(&self, other: &Self) -> bool {
                self.core == other.core
                    && self.generic_parameters() == other.generic_parameters()
                    && self.generic_requirements() == other.generic_requirements()
                    && self.inheritance() == other.inheritance()
                    && self.members() == other.members()
                    $(&& self.$field() == other.$field())*
            }
        }

        impl fmt::Debug for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($kind))
                    .field("name", &self.name())
                    .field("generic_parameters", &self.generic_parameters())
                    .field("inheritance", &self.inheritance())
                    .finish_non_exhaustive()
            }
        }
    };
}

nominal_type! {
    /// `class Name<T>: Base { ... }`
    Class {}
}

nominal_type! {
    /// `struct Name<T>: Protocol { ... }`
    Structure {}
}

nominal_type! {
    /// `actor Name { ... }`
    Actor {}
}

nominal_type! {
    /// `enum Name: RawValue { case ... }`
    Enumeration {
        cases: Vec<EnumCase>,
    }
}

nominal_type! {
    /// `protocol Name<Primary>: Base { ... }`
    Protocol {
        primary_associated_types: Vec<SmolStr>,
        associated_types: Vec<AssociatedType>,
    }
}

nominal_type! {
    /// `extension Type: Protocol where ... { ... }`
    Extension {}
}

/// Children of a member block of `kind`, looking through `#if` blocks.
fn members_of_kind(block: &SyntaxNode, kind: SyntaxKind, mode: ViewMode) -> Vec<SyntaxNode> {
    let mut found = Vec::new();
    for child in block.children_in(mode) {
        match child.kind() {
            k if k == kind => found.push(child),
            SyntaxKind::IfConfigDecl | SyntaxKind::IfConfigClause => {
                found.extend(members_of_kind(&child, kind, mode));
            }
            _ => {}
        }
    }
    found
}

/// One element of a `case` declaration inside an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    /// Case name.
    pub name: SmolStr,
    /// Text of the raw value after `=`.
    pub raw_value: Option<String>,
    /// Associated values in order.
    pub associated_values: Vec<Parameter>,
    /// Attributes of the `case` declaration.
    pub attributes: Vec<Attribute>,
    /// Modifiers of the `case` declaration.
    pub modifiers: Vec<Modifier>,
    /// `indirect case`, or any case of an `indirect enum`.
    pub is_indirect: bool,
}

fn enum_case_from(element: &SyntaxNode, enum_is_indirect: bool, mode: ViewMode) -> Option<EnumCase> {
    let decl = element
        .parent()
        .filter(|parent| parent.kind() == SyntaxKind::EnumCaseDecl);
    debug_assert!(decl.is_some(), "enum case element outside a case declaration");
    let decl = decl?;

    let modifiers = modifiers_in(&decl, mode);
    let is_indirect =
        enum_is_indirect || modifiers.iter().any(|modifier| modifier.name == "indirect");
    let associated_values = element
        .child_of_kind(SyntaxKind::EnumCaseParameterClause)
        .map(|clause| {
            clause
                .children_in(mode)
                .filter(|child| child.kind() == SyntaxKind::EnumCaseParameter)
                .map(|parameter| parameter_from_enum_case(&parameter, mode))
                .collect()
        })
        .unwrap_or_default();

    Some(EnumCase {
        name: element
            .child_of_kind(SyntaxKind::Name)
            .map(|name| SmolStr::new(name.description()))
            .unwrap_or_default(),
        raw_value: initializer_text(element, mode),
        associated_values,
        attributes: attributes_in(&decl, mode),
        modifiers,
        is_indirect,
    })
}

impl Enumeration {
    /// Every case element, in source order, including cases inside `#if`.
    #[must_use]
    pub fn cases(&self) -> &[EnumCase] {
        self.cases.get_or_init(|| {
            let mode = self.core.view_mode();
            let Some(block) = self.syntax().child_of_kind(SyntaxKind::MemberBlock) else {
                return Vec::new();
            };
            let is_indirect = self.has_modifier("indirect");
            members_of_kind(&block, SyntaxKind::EnumCaseDecl, mode)
                .iter()
                .flat_map(|decl| {
                    decl.children_in(mode)
                        .filter(|child| child.kind() == SyntaxKind::EnumCaseElement)
                        .collect::<Vec<_>>()
                })
                .filter_map(|element| enum_case_from(&element, is_indirect, mode))
                .collect()
        })
    }
}

impl Protocol {
    /// Names in the primary associated type clause: `protocol P<Element>`.
    #[must_use]
    pub fn primary_associated_types(&self) -> &[SmolStr] {
        self.primary_associated_types.get_or_init(|| {
            self.syntax()
                .child_of_kind(SyntaxKind::PrimaryAssociatedTypeClause)
                .map(|clause| {
                    clause
                        .children()
                        .filter(|child| child.kind() == SyntaxKind::Name)
                        .map(|name| SmolStr::new(name.description()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// `associatedtype` requirements. These never appear in [`Self::members`].
    #[must_use]
    pub fn associated_types(&self) -> &[AssociatedType] {
        self.associated_types.get_or_init(|| {
            let Some(block) = self.syntax().child_of_kind(SyntaxKind::MemberBlock) else {
                return Vec::new();
            };
            members_of_kind(&block, SyntaxKind::AssociatedTypeDecl, self.core.view_mode())
                .into_iter()
                .map(|node| AssociatedType::new(node, Arc::clone(self.core.context())))
                .collect()
        })
    }
}

impl Extension {
    /// The extended type as written.
    #[must_use]
    pub fn extended_type(&self) -> &str {
        self.name()
    }
}

/// `associatedtype Element: Hashable = Int where ...` inside a protocol.
pub struct AssociatedType {
    core: DeclCore,
    inheritance: OnceCell<Vec<SmolStr>>,
    requirements: OnceCell<Vec<GenericRequirement>>,
    default_type: OnceCell<EntityType>,
}

impl AssociatedType {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            inheritance: OnceCell::new(),
            requirements: OnceCell::new(),
            default_type: OnceCell::new(),
        }
    }

    /// Conformances after `:`.
    #[must_use]
    pub fn inheritance(&self) -> &[SmolStr] {
        self.inheritance
            .get_or_init(|| inheritance_in(self.syntax(), self.core.view_mode()))
    }

    /// Requirements from the `where` clause.
    #[must_use]
    pub fn requirements(&self) -> &[GenericRequirement] {
        self.requirements
            .get_or_init(|| generic_requirements_in(self.syntax(), self.core.view_mode()))
    }

    /// The default after `=`, or [`EntityType::Empty`].
    #[must_use]
    pub fn default_type(&self) -> &EntityType {
        self.default_type.get_or_init(|| {
            self.syntax()
                .child_of_kind(SyntaxKind::TypeInitializerClause)
                .and_then(|clause| clause.children().find(|child| child.kind().is_type()))
                .map_or(EntityType::Empty, |ty| classify(&ty))
        })
    }
}

impl_declaration!(AssociatedType);

impl PartialEq for AssociatedType {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.inheritance() == other.inheritance()
            && self.requirements() == other.requirements()
            && self.default_type() == other.default_type()
    }
}

impl fmt::Debug for AssociatedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssociatedType")
            .field("name", &self.name())
            .field("inheritance", &self.inheritance())
            .field("default_type", self.default_type())
            .finish_non_exhaustive()
    }
}
