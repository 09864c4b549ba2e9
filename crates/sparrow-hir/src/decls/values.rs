//! Variables, type aliases and imports.

use std::fmt;
use std::iter;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeExt};

use super::base::{DeclCore, Declaration};
use super::common::{
    accessors_from, generic_parameters_in, generic_requirements_in, initializer_text, Accessor,
    AccessorKind, GenericParameter, GenericRequirement,
};
use crate::context::ExplorerContext;
use crate::types::{classify, EntityType};

fn annotated_type(binding: &SyntaxNode) -> Option<SyntaxNode> {
    binding
        .child_of_kind(SyntaxKind::TypeAnnotation)
        .and_then(|annotation| annotation.children().find(|child| child.kind().is_type()))
}

/// One binding of a `let`/`var` declaration.
///
/// `var a = 1, b: Int` yields two variables sharing the keyword, attributes
/// and modifiers of the declaration.
pub struct Variable {
    core: DeclCore,
    binding: SyntaxNode,
    name: SmolStr,
    ty: OnceCell<EntityType>,
    accessors: OnceCell<Vec<Accessor>>,
}

impl Variable {
    /// One variable per `PatternBinding` of a `VariableDecl`.
    pub(crate) fn for_bindings(node: &SyntaxNode, ctx: &Arc<ExplorerContext>) -> Vec<Self> {
        let mode = ctx.view_mode();
        node.child_of_kind(SyntaxKind::PatternBindingList)
            .map(|list| {
                list.children_in(mode)
                    .filter(|child| child.kind() == SyntaxKind::PatternBinding)
                    .map(|binding| Self::new(node.clone(), binding, Arc::clone(ctx)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn new(node: SyntaxNode, binding: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        let name = binding
            .children()
            .find(|child| child.kind().is_pattern())
            .map(|pattern| SmolStr::new(pattern.description()))
            .unwrap_or_default();
        Self {
            core: DeclCore::new(node, ctx),
            binding,
            name,
            ty: OnceCell::new(),
            accessors: OnceCell::new(),
        }
    }

    /// The `PatternBinding` node of this variable.
    #[must_use]
    pub fn binding(&self) -> &SyntaxNode {
        &self.binding
    }

    /// The annotation type node. A binding with neither annotation nor
    /// initializer uses the annotation of the next binding that has one,
    /// as in `var a, b: Int`.
    fn type_node(&self) -> Option<SyntaxNode> {
        if let Some(ty) = annotated_type(&self.binding) {
            return Some(ty);
        }
        if self.binding.child_of_kind(SyntaxKind::InitializerClause).is_some() {
            return None;
        }
        iter::successors(self.binding.next_sibling(), SyntaxNode::next_sibling)
            .filter(|sibling| sibling.kind() == SyntaxKind::PatternBinding)
            .find(|sibling| {
                sibling.child_of_kind(SyntaxKind::TypeAnnotation).is_some()
                    || sibling.child_of_kind(SyntaxKind::InitializerClause).is_some()
            })
            .and_then(|sibling| annotated_type(&sibling))
    }

    /// The declared type, or [`EntityType::Empty`] without an annotation.
    #[must_use]
    pub fn ty(&self) -> &EntityType {
        self.ty
            .get_or_init(|| self.type_node().map_or(EntityType::Empty, |ty| classify(&ty)))
    }

    /// The annotation as written.
    #[must_use]
    pub fn type_text(&self) -> Option<String> {
        self.type_node().map(|ty| ty.description())
    }

    /// Returns `true` if the declared type is optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.ty().is_optional()
    }

    /// Text of the initial value.
    #[must_use]
    pub fn initializer(&self) -> Option<String> {
        initializer_text(&self.binding, self.core.view_mode())
    }

    /// Accessors and observers. Empty for plain stored properties.
    #[must_use]
    pub fn accessors(&self) -> &[Accessor] {
        self.accessors.get_or_init(|| {
            self.binding
                .child_of_kind(SyntaxKind::AccessorBlock)
                .map(|block| accessors_from(&block, self.core.view_mode()))
                .unwrap_or_default()
        })
    }

    /// Returns `true` if the value comes from a getter rather than storage.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.accessors().iter().any(|accessor| {
            matches!(
                accessor.kind,
                AccessorKind::Get | AccessorKind::Read | AccessorKind::UnsafeAddress
            )
        })
    }

    /// Returns `true` if the variable can be assigned: a stored `var`, or a
    /// computed property with a setter.
    #[must_use]
    pub fn has_setter(&self) -> bool {
        if self.is_computed() {
            return self.accessors().iter().any(|accessor| {
                matches!(
                    accessor.kind,
                    AccessorKind::Set | AccessorKind::Modify | AccessorKind::UnsafeMutableAddress
                )
            });
        }
        self.keyword() == "var"
    }
}

impl Declaration for Variable {
    fn core(&self) -> &DeclCore {
        &self.core
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.name == other.name
            && self.ty() == other.ty()
            && self.initializer() == other.initializer()
            && self.accessors() == other.accessors()
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("keyword", &self.keyword())
            .field("name", &self.name)
            .field("ty", self.ty())
            .finish_non_exhaustive()
    }
}

/// `typealias Name<T> = Type where ...`
pub struct TypeAlias {
    core: DeclCore,
    generic_parameters: OnceCell<Vec<GenericParameter>>,
    generic_requirements: OnceCell<Vec<GenericRequirement>>,
    initialized_type: OnceCell<EntityType>,
}

impl TypeAlias {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            generic_parameters: OnceCell::new(),
            generic_requirements: OnceCell::new(),
            initialized_type: OnceCell::new(),
        }
    }

    fn initialized_type_node(&self) -> Option<SyntaxNode> {
        self.syntax()
            .child_of_kind(SyntaxKind::TypeInitializerClause)
            .and_then(|clause| clause.children().find(|child| child.kind().is_type()))
    }

    /// Parameters of the generic clause.
    #[must_use]
    pub fn generic_parameters(&self) -> &[GenericParameter] {
        self.generic_parameters
            .get_or_init(|| generic_parameters_in(self.syntax(), self.core.view_mode()))
    }

    /// Requirements from `where` clauses.
    #[must_use]
    pub fn generic_requirements(&self) -> &[GenericRequirement] {
        self.generic_requirements
            .get_or_init(|| generic_requirements_in(self.syntax(), self.core.view_mode()))
    }

    /// The aliased type.
    #[must_use]
    pub fn initialized_type(&self) -> &EntityType {
        self.initialized_type.get_or_init(|| {
            self.initialized_type_node()
                .map_or(EntityType::Empty, |ty| classify(&ty))
        })
    }

    /// The aliased type as written.
    #[must_use]
    pub fn initialized_type_text(&self) -> Option<String> {
        self.initialized_type_node().map(|ty| ty.description())
    }
}

/// `@testable import struct Module.Type`
pub struct Import {
    core: DeclCore,
}

impl Import {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
        }
    }

    /// Module and member names of the imported path.
    #[must_use]
    pub fn path(&self) -> Vec<SmolStr> {
        self.syntax()
            .child_of_kind(SyntaxKind::ImportPath)
            .map(|path| {
                path.tokens_in(self.core.view_mode())
                    .filter(|token| token.kind() != SyntaxKind::Dot)
                    .map(|token| SmolStr::new(token.text()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The kind keyword of a scoped import: `struct`, `func`, `var`...
    #[must_use]
    pub fn import_kind(&self) -> Option<SmolStr> {
        self.syntax()
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|token| !token.kind().is_trivia())
            .nth(1)
            .map(|token| SmolStr::new(token.text()))
    }

    /// Returns `true` for `@testable import`.
    #[must_use]
    pub fn is_testable(&self) -> bool {
        self.has_attribute("testable")
    }
}

impl_declaration!(TypeAlias, Import);

impl PartialEq for TypeAlias {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.generic_parameters() == other.generic_parameters()
            && self.generic_requirements() == other.generic_requirements()
            && self.initialized_type() == other.initialized_type()
    }
}

impl PartialEq for Import {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.path() == other.path()
            && self.import_kind() == other.import_kind()
    }
}

impl fmt::Debug for TypeAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAlias")
            .field("name", &self.name())
            .field("initialized_type", self.initialized_type())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Import")
            .field("path", &self.path())
            .field("import_kind", &self.import_kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        collect_declarations_from_source, AccessorKind, Declaration, DeclarationCollection,
        EntityType, ExplorerConfig,
    };

    fn collect(source: &str) -> DeclarationCollection {
        collect_declarations_from_source(source, &ExplorerConfig::default())
    }

    #[test]
    fn test_bindings_share_declaration() {
        let declarations = collect("private static var a = 1, b: String?, (c, _) = (1, 2)");
        let names: Vec<_> = declarations.variables.iter().map(|v| v.name()).collect();
        assert_eq!(names, ["a", "b", "(c, _)"]);
        for variable in &declarations.variables {
            assert_eq!(variable.keyword(), "var");
            assert!(variable.has_modifier("private"));
            assert!(variable.has_modifier("static"));
        }
        assert_eq!(*declarations.variables[0].ty(), EntityType::Empty);
        assert_eq!(declarations.variables[0].initializer().as_deref(), Some("1"));
        assert!(declarations.variables[1].is_optional());
        assert_eq!(declarations.variables[1].type_text().as_deref(), Some("String?"));
    }

    #[test]
    fn test_binding_borrows_next_annotation() {
        let declarations = collect("var x, y: Int, z = 0");
        assert_eq!(*declarations.variables[0].ty(), EntityType::simple("Int"));
        assert_eq!(*declarations.variables[1].ty(), EntityType::simple("Int"));
        assert_eq!(*declarations.variables[2].ty(), EntityType::Empty);
    }

    #[test]
    fn test_stored_and_computed_properties() {
        let declarations = collect(
            "struct S {\n    let id: Int\n    var count = 0 {\n        didSet {}\n    }\n    var double: Int { count * 2 }\n    var label: String {\n        get { \"\" }\n        set {}\n    }\n}",
        );
        let variables = &declarations.structures[0].members().variables;

        assert!(!variables[0].is_computed());
        assert!(!variables[0].has_setter());

        assert!(!variables[1].is_computed());
        assert!(variables[1].has_setter());
        assert_eq!(variables[1].accessors()[0].kind, AccessorKind::DidSet);

        assert!(variables[2].is_computed());
        assert!(!variables[2].has_setter());

        assert!(variables[3].is_computed());
        assert!(variables[3].has_setter());
    }

    #[test]
    fn test_typealias() {
        let declarations = collect("typealias Pair<T> = (first: T, second: T?) where T: Equatable");
        let alias = &declarations.typealiases[0];
        assert_eq!(alias.name(), "Pair");
        assert_eq!(alias.generic_parameters()[0].name, "T");
        assert_eq!(alias.generic_requirements().len(), 1);
        assert_eq!(
            alias.initialized_type_text().as_deref(),
            Some("(first: T, second: T?)")
        );
        let EntityType::Tuple { elements, .. } = alias.initialized_type() else {
            panic!("expected tuple");
        };
        assert!(elements[1].is_optional());
    }

    #[test]
    fn test_imports() {
        let declarations = collect(
            "import Foundation\n@testable import MyKit\nimport struct Swift.Array\nimport func Darwin.sqrt",
        );
        let imports = &declarations.imports;
        assert_eq!(imports[0].path(), ["Foundation"]);
        assert_eq!(imports[0].import_kind(), None);
        assert!(imports[1].is_testable());
        assert_eq!(imports[2].path(), ["Swift", "Array"]);
        assert_eq!(imports[2].import_kind().as_deref(), Some("struct"));
        assert_eq!(imports[3].import_kind().as_deref(), Some("func"));
        assert_eq!(imports[3].name(), "Darwin.sqrt");
    }
}
