//! Declaration collector.
//!
//! One depth-first walk sorts declaration nodes into per-kind sequences. A
//! recognized node is recorded and its subtree skipped; the declaration
//! collects its own children later, on first access, with the same walk.

use std::sync::Arc;

use rowan::WalkEvent;
use sparrow_syntax::{SyntaxKind, SyntaxNode};
use tracing::{debug, trace};

use crate::context::ExplorerContext;
use crate::decls::{
    Actor, Class, ConditionalCompilationBlock, Declaration, Deinitializer, Enumeration, Extension,
    Function, Import, Initializer, Operator, PrecedenceGroup, Protocol, Structure, Subscript,
    SwitchExpression, TypeAlias, Variable,
};

macro_rules! declaration_collection {
    ($($(#[doc = $doc:literal])* $field:ident: $kind:ident),* $(,)?) => {
        /// Declarations found by one walk, one source-ordered sequence per kind.
        #[derive(Debug, Default, PartialEq)]
        pub struct DeclarationCollection {
            $($(#[doc = $doc])* pub $field: Vec<$kind>,)*
        }

        impl DeclarationCollection {
            /// Number of declarations across all kinds.
            #[must_use]
            pub fn len(&self) -> usize {
                0 $(+ self.$field.len())*
            }

            /// Every declaration, ordered by position in the source.
            #[must_use]
            pub fn all(&self) -> Vec<&dyn Declaration> {
                let mut all: Vec<&dyn Declaration> = Vec::with_capacity(self.len());
                $(all.extend(self.$field.iter().map(|decl| decl as &dyn Declaration));)*
                all.sort_by_key(|decl| {
                    let range = decl.range();
                    (range.start(), range.end())
                });
                all
            }

            fn summary(&self) -> String {
                let mut parts = Vec::new();
                $(
                    if !self.$field.is_empty() {
                        parts.push(format!("{}={}", stringify!($field), self.$field.len()));
                    }
                )*
                parts.join(" ")
            }
        }

        $(
            impl DeclarationKind for $kind {
                fn of(collection: &DeclarationCollection) -> &[Self] {
                    &collection.$field
                }
            }
        )*
    };
}

declaration_collection! {
    /// `actor` declarations.
    actors: Actor,
    /// `class` declarations.
    classes: Class,
    /// `#if` blocks.
    conditional_compilation_blocks: ConditionalCompilationBlock,
    /// `deinit` declarations.
    deinitializers: Deinitializer,
    /// `enum` declarations.
    enumerations: Enumeration,
    /// `extension` declarations.
    extensions: Extension,
    /// `func` declarations.
    functions: Function,
    /// `import` declarations.
    imports: Import,
    /// `init` declarations.
    initializers: Initializer,
    /// `operator` declarations.
    operators: Operator,
    /// `precedencegroup` declarations.
    precedence_groups: PrecedenceGroup,
    /// `protocol` declarations.
    protocols: Protocol,
    /// `struct` declarations.
    structures: Structure,
    /// `subscript` declarations.
    subscripts: Subscript,
    /// `typealias` declarations.
    typealiases: TypeAlias,
    /// One entry per binding of each `let`/`var`.
    variables: Variable,
    /// `switch` statements and expressions.
    switches: SwitchExpression,
}

/// A declaration type stored in its own [`DeclarationCollection`] sequence.
pub trait DeclarationKind: Declaration + Sized {
    /// The sequence holding this kind.
    fn of(collection: &DeclarationCollection) -> &[Self];
}

impl DeclarationCollection {
    /// Returns `true` if no declaration was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sequence for kind `K`.
    #[must_use]
    pub fn of_kind<K: DeclarationKind>(&self) -> &[K] {
        K::of(self)
    }

    /// Records `node` if it introduces a declaration.
    ///
    /// Returns `true` when the walk must not descend into `node`.
    fn record(&mut self, node: &SyntaxNode, ctx: &Arc<ExplorerContext>) -> bool {
        let decl = node.clone();
        let ctx_ref = Arc::clone(ctx);
        match node.kind() {
            SyntaxKind::ActorDecl => self.actors.push(Actor::new(decl, ctx_ref)),
            SyntaxKind::ClassDecl => self.classes.push(Class::new(decl, ctx_ref)),
            SyntaxKind::IfConfigDecl => self
                .conditional_compilation_blocks
                .push(ConditionalCompilationBlock::new(decl, ctx_ref)),
            SyntaxKind::DeinitializerDecl => {
                self.deinitializers.push(Deinitializer::new(decl, ctx_ref));
            }
            SyntaxKind::EnumDecl => self.enumerations.push(Enumeration::new(decl, ctx_ref)),
            SyntaxKind::ExtensionDecl => self.extensions.push(Extension::new(decl, ctx_ref)),
            SyntaxKind::FunctionDecl => self.functions.push(Function::new(decl, ctx_ref)),
            SyntaxKind::ImportDecl => self.imports.push(Import::new(decl, ctx_ref)),
            SyntaxKind::InitializerDecl => self.initializers.push(Initializer::new(decl, ctx_ref)),
            SyntaxKind::OperatorDecl => self.operators.push(Operator::new(decl, ctx_ref)),
            SyntaxKind::PrecedenceGroupDecl => {
                self.precedence_groups.push(PrecedenceGroup::new(decl, ctx_ref));
            }
            SyntaxKind::ProtocolDecl => self.protocols.push(Protocol::new(decl, ctx_ref)),
            SyntaxKind::StructDecl => self.structures.push(Structure::new(decl, ctx_ref)),
            SyntaxKind::SubscriptDecl => self.subscripts.push(Subscript::new(decl, ctx_ref)),
            SyntaxKind::TypeAliasDecl => self.typealiases.push(TypeAlias::new(decl, ctx_ref)),
            SyntaxKind::VariableDecl => self.variables.extend(Variable::for_bindings(node, ctx)),
            SyntaxKind::SwitchExpr => self.switches.push(SwitchExpression::new(decl, ctx_ref)),
            // Gathered by the owning protocol or enumeration.
            SyntaxKind::AssociatedTypeDecl | SyntaxKind::EnumCaseDecl => return true,
            _ => return false,
        }
        trace!(
            "recorded declaration kind={:?} range={:?}",
            node.kind(),
            node.text_range()
        );
        true
    }
}

/// Collects the declarations at and below `root`.
#[must_use]
pub fn collect(root: &SyntaxNode, ctx: &Arc<ExplorerContext>) -> DeclarationCollection {
    walk(root, true, ctx)
}

/// Collects the declarations below `node`, ignoring `node` itself.
#[must_use]
pub fn collect_entering_at(node: &SyntaxNode, ctx: &Arc<ExplorerContext>) -> DeclarationCollection {
    walk(node, false, ctx)
}

fn walk(root: &SyntaxNode, include_root: bool, ctx: &Arc<ExplorerContext>) -> DeclarationCollection {
    let mode = ctx.view_mode();
    let mut collection = DeclarationCollection::default();
    let mut preorder = root.preorder();

    while let Some(event) = preorder.next() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };
        if !include_root && node == *root {
            continue;
        }
        if !mode.includes(&node) || collection.record(&node, ctx) {
            preorder.skip_subtree();
        }
    }

    debug!(
        "collected declarations entry={:?} total={} {}",
        root.kind(),
        collection.len(),
        collection.summary()
    );
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExplorerConfig;
    use sparrow_syntax::{parse, ViewMode};

    fn context(source: &str, view_mode: ViewMode) -> Arc<ExplorerContext> {
        ExplorerContext::shared(ExplorerConfig::with_view_mode(view_mode), source)
    }

    #[test]
    fn test_collect_skips_declaration_subtrees() {
        let source = "struct A {\n    func inner() {}\n    struct B {}\n}\nfunc outer() {}";
        let root = parse(source).syntax();
        let declarations = collect(&root, &context(source, ViewMode::SourceAccurate));

        assert_eq!(declarations.structures.len(), 1);
        assert_eq!(declarations.functions.len(), 1);
        assert_eq!(declarations.functions[0].name(), "outer");
        assert_eq!(declarations.len(), 2);

        let members = declarations.structures[0].members();
        assert_eq!(members.functions[0].name(), "inner");
        assert_eq!(members.structures[0].name(), "B");
    }

    #[test]
    fn test_collect_entering_at_ignores_entry_node() {
        let source = "class Box { var item = 0 }";
        let root = parse(source).syntax();
        let ctx = context(source, ViewMode::SourceAccurate);
        let class = root
            .descendants()
            .find(|node| node.kind() == SyntaxKind::ClassDecl)
            .expect("class");

        assert_eq!(collect(&class, &ctx).classes.len(), 1);
        let inside = collect_entering_at(&class, &ctx);
        assert!(inside.classes.is_empty());
        assert_eq!(inside.variables.len(), 1);
    }

    #[test]
    fn test_one_variable_per_binding() {
        let source = "var a, b: Int, c = \"x\"";
        let root = parse(source).syntax();
        let declarations = collect(&root, &context(source, ViewMode::SourceAccurate));
        let names: Vec<_> = declarations.variables.iter().map(|v| v.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_all_is_source_ordered() {
        let source = "import Foundation\nlet x = 1\nclass C {}\nfunc f() {}\ntypealias T = Int";
        let root = parse(source).syntax();
        let declarations = collect(&root, &context(source, ViewMode::SourceAccurate));
        let keywords: Vec<_> = declarations.all().iter().map(|d| d.keyword().to_string()).collect();
        assert_eq!(keywords, ["import", "let", "class", "func", "typealias"]);
        assert_eq!(declarations.of_kind::<Class>().len(), 1);
        assert_eq!(declarations.of_kind::<TypeAlias>()[0].name(), "T");
    }

    #[test]
    fn test_empty_source() {
        let root = parse("").syntax();
        let declarations = collect(&root, &context("", ViewMode::SourceAccurate));
        assert!(declarations.is_empty());
        assert!(declarations.all().is_empty());
    }
}
