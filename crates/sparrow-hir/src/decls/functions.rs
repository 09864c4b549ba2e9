//! Functions, initializers, deinitializers and subscripts.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use sparrow_syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt};

use super::base::{DeclCore, Declaration};
use super::common::{
    accessors_from, effects_in, generic_parameters_in, generic_requirements_in, signature_in,
    Accessor, EffectSpecifiers, GenericParameter, GenericRequirement, Signature,
};
use super::operators::is_valid_identifier;
use crate::collector::DeclarationCollection;
use crate::context::ExplorerContext;
use crate::types::{EntityType, Parameter};

/// Generic clause, signature and body shared by functions, initializers and
/// subscripts.
#[derive(Default)]
struct Callable {
    generic_parameters: OnceCell<Vec<GenericParameter>>,
    generic_requirements: OnceCell<Vec<GenericRequirement>>,
    signature: OnceCell<Signature>,
    body: OnceCell<DeclarationCollection>,
}

impl Callable {
    fn generic_parameters(&self, core: &DeclCore) -> &[GenericParameter] {
        self.generic_parameters
            .get_or_init(|| generic_parameters_in(core.syntax(), core.view_mode()))
    }

    fn generic_requirements(&self, core: &DeclCore) -> &[GenericRequirement] {
        self.generic_requirements
            .get_or_init(|| generic_requirements_in(core.syntax(), core.view_mode()))
    }

    fn signature(&self, core: &DeclCore) -> &Signature {
        self.signature
            .get_or_init(|| signature_in(core.syntax(), core.view_mode()))
    }

    fn body(&self, core: &DeclCore, body_kind: SyntaxKind) -> &DeclarationCollection {
        self.body
            .get_or_init(|| core.collect_below(core.syntax().child_of_kind(body_kind).as_ref()))
    }
}

/// `func name<T>(parameters) async throws -> Output where ... { body }`
pub struct Function {
    core: DeclCore,
    callable: Callable,
}

impl Function {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            callable: Callable::default(),
        }
    }

    /// The function name, or the operator for operator functions.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.name()
    }

    /// Returns `true` for operator implementations such as `static func ==`.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        is_valid_identifier(self.identifier())
    }

    /// Parameters of the generic clause.
    #[must_use]
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        self.callable.generic_parameters(&self.core)
    }

    /// Requirements from `where` clauses.
    #[must_use]
    pub fn generic_requirements(&self) -> &[GenericRequirement] {
        self.callable.generic_requirements(&self.core)
    }

    /// Parameters, output and effects.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        self.callable.signature(&self.core)
    }

    /// Returns `true` if a body is written.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.syntax().child_of_kind(SyntaxKind::CodeBlock).is_some()
    }

    /// Declarations in the body, collected on first access.
    #[must_use]
    pub fn body(&self) -> &DeclarationCollection {
        self.callable.body(&self.core, SyntaxKind::CodeBlock)
    }
}

/// `init?<T>(parameters) throws where ... { body }`
pub struct Initializer {
    core: DeclCore,
    callable: Callable,
}

impl Initializer {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            callable: Callable::default(),
        }
    }

    /// `?` or `!` written after `init`.
    #[must_use]
    pub fn optional_marker(&self) -> Option<char> {
        let syntax = self.syntax();
        if syntax.token_of_kind(SyntaxKind::Question).is_some() {
            Some('?')
        } else if syntax.token_of_kind(SyntaxKind::Exclamation).is_some() {
            Some('!')
        } else {
            None
        }
    }

    /// Returns `true` for failable initializers.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional_marker().is_some()
    }

    /// Parameters of the generic clause.
    #[must_use]
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        self.callable.generic_parameters(&self.core)
    }

    /// Requirements from `where` clauses.
    #[must_use]
    pub fn generic_requirements(&self) -> &[GenericRequirement] {
        self.callable.generic_requirements(&self.core)
    }

    /// Parameters and effects. Initializers have no output.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        self.callable.signature(&self.core)
    }

    /// Declarations in the body, collected on first access.
    #[must_use]
    pub fn body(&self) -> &DeclarationCollection {
        self.callable.body(&self.core, SyntaxKind::CodeBlock)
    }
}

/// `deinit { body }`
pub struct Deinitializer {
    core: DeclCore,
    effects: OnceCell<EffectSpecifiers>,
    body: OnceCell<DeclarationCollection>,
}

impl Deinitializer {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            effects: OnceCell::new(),
            body: OnceCell::new(),
        }
    }

    /// `async` written after `deinit`.
    #[must_use]
    pub fn effects(&self) -> &EffectSpecifiers {
        self.effects.get_or_init(|| effects_in(self.syntax()))
    }

    /// Declarations in the body, collected on first access.
    #[must_use]
    pub fn body(&self) -> &DeclarationCollection {
        self.body.get_or_init(|| {
            self.core
                .collect_below(self.syntax().child_of_kind(SyntaxKind::CodeBlock).as_ref())
        })
    }
}

/// `subscript<T>(parameters) -> Output { accessors }`
pub struct Subscript {
    core: DeclCore,
    callable: Callable,
    accessors: OnceCell<Vec<Accessor>>,
}

impl Subscript {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            callable: Callable::default(),
            accessors: OnceCell::new(),
        }
    }

    /// Parameters of the generic clause.
    #[must_use]
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        self.callable.generic_parameters(&self.core)
    }

    /// Requirements from `where` clauses.
    #[must_use]
    pub fn generic_requirements(&self) -> &[GenericRequirement] {
        self.callable.generic_requirements(&self.core)
    }

    /// Index parameters.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.callable.signature(&self.core).input
    }

    /// The element type after `->`, or [`EntityType::Empty`].
    #[must_use]
    pub fn return_type(&self) -> &EntityType {
        const EMPTY: &EntityType = &EntityType::Empty;
        self.callable
            .signature(&self.core)
            .output
            .as_ref()
            .unwrap_or(EMPTY)
    }

    /// Accessors; a bare body is an implicit getter. Empty without a body.
    #[must_use]
    pub fn accessors(&self) -> &[Accessor] {
        self.accessors.get_or_init(|| {
            self.syntax()
                .child_of_kind(SyntaxKind::AccessorBlock)
                .map(|block| accessors_from(&block, self.core.view_mode()))
                .unwrap_or_default()
        })
    }

    /// Declarations in the accessor block, collected on first access.
    #[must_use]
    pub fn body(&self) -> &DeclarationCollection {
        self.callable.body(&self.core, SyntaxKind::AccessorBlock)
    }
}

impl_declaration!(Function, Initializer, Deinitializer, Subscript);

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.generic_parameters() == other.generic_parameters()
            && self.generic_requirements() == other.generic_requirements()
            && self.signature() == other.signature()
            && self.body() == other.body()
    }
}

impl PartialEq for Initializer {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.optional_marker() == other.optional_marker()
            && self.generic_parameters() == other.generic_parameters()
            && self.generic_requirements() == other.generic_requirements()
            && self.signature() == other.signature()
            && self.body() == other.body()
    }
}

impl PartialEq for Deinitializer {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core && self.effects() == other.effects() && self.body() == other.body()
    }
}

impl PartialEq for Subscript {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.generic_parameters() == other.generic_parameters()
            && self.generic_requirements() == other.generic_requirements()
            && self.parameters() == other.parameters()
            && self.return_type() == other.return_type()
            && self.accessors() == other.accessors()
            && self.body() == other.body()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("identifier", &self.identifier())
            .field("signature", self.signature())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initializer")
            .field("optional_marker", &self.optional_marker())
            .field("signature", self.signature())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Deinitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deinitializer")
            .field("effects", self.effects())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscript")
            .field("parameters", &self.parameters())
            .field("return_type", self.return_type())
            .field("accessors", &self.accessors())
            .finish_non_exhaustive()
    }
}
