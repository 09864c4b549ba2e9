//! State and accessors shared by every declaration kind.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeExt, ViewMode};
use text_size::TextRange;

use super::common::{attributes_in, modifiers_in, Attribute, Modifier};
use crate::collector::{collect_entering_at, DeclarationCollection};
use crate::context::ExplorerContext;
use crate::location::SourceLocation;

/// The node, context and memoized common properties of one declaration.
pub struct DeclCore {
    node: SyntaxNode,
    ctx: Arc<ExplorerContext>,
    keyword: OnceCell<SmolStr>,
    name: OnceCell<SmolStr>,
    attributes: OnceCell<Vec<Attribute>>,
    modifiers: OnceCell<Vec<Modifier>>,
}

impl DeclCore {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            node,
            ctx,
            keyword: OnceCell::new(),
            name: OnceCell::new(),
            attributes: OnceCell::new(),
            modifiers: OnceCell::new(),
        }
    }

    /// The declaration node.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxNode {
        &self.node
    }

    /// The context the declaration was collected with.
    #[must_use]
    pub fn context(&self) -> &Arc<ExplorerContext> {
        &self.ctx
    }

    /// The view mode of the context.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.ctx.view_mode()
    }

    /// The introducing keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        self.keyword.get_or_init(|| keyword_of(&self.node))
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| name_of(&self.node))
    }

    /// Attributes written before the declaration.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        self.attributes
            .get_or_init(|| attributes_in(&self.node, self.view_mode()))
    }

    /// Modifiers written before the keyword.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        self.modifiers
            .get_or_init(|| modifiers_in(&self.node, self.view_mode()))
    }

    /// Collects the declarations below `entry`, or nothing when there is no
    /// entry node.
    pub(crate) fn collect_below(&self, entry: Option<&SyntaxNode>) -> DeclarationCollection {
        entry.map_or_else(DeclarationCollection::default, |node| {
            collect_entering_at(node, &self.ctx)
        })
    }
}

impl PartialEq for DeclCore {
    fn eq(&self, other: &Self) -> bool {
        self.keyword() == other.keyword()
            && self.name() == other.name()
            && self.attributes() == other.attributes()
            && self.modifiers() == other.modifiers()
            && self.node.description() == other.node.description()
    }
}

impl fmt::Debug for DeclCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclCore")
            .field("kind", &self.node.kind())
            .field("range", &self.node.trimmed_range())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// First significant token outside the attribute and modifier lists.
fn keyword_of(node: &SyntaxNode) -> SmolStr {
    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Token(token) if token.kind().is_trivia() => {}
            SyntaxElement::Token(token) => return token.text().into(),
            SyntaxElement::Node(child)
                if matches!(
                    child.kind(),
                    SyntaxKind::AttributeList | SyntaxKind::ModifierList
                ) => {}
            SyntaxElement::Node(child) => {
                return child
                    .first_significant_token()
                    .map(|token| SmolStr::new(token.text()))
                    .unwrap_or_default();
            }
        }
    }
    SmolStr::default()
}

fn name_of(node: &SyntaxNode) -> SmolStr {
    if let Some(name) = node.child_of_kind(SyntaxKind::Name) {
        return name.description().into();
    }
    match node.kind() {
        SyntaxKind::ExtensionDecl => node
            .children()
            .find(|child| child.kind().is_type())
            .map(|ty| SmolStr::new(ty.description()))
            .unwrap_or_default(),
        SyntaxKind::ImportDecl => node
            .child_of_kind(SyntaxKind::ImportPath)
            .map(|path| SmolStr::new(path.description()))
            .unwrap_or_default(),
        SyntaxKind::VariableDecl => node
            .child_of_kind(SyntaxKind::PatternBindingList)
            .and_then(|list| list.child_of_kind(SyntaxKind::PatternBinding))
            .and_then(|binding| binding.children().find(|child| child.kind().is_pattern()))
            .map(|pattern| SmolStr::new(pattern.description()))
            .unwrap_or_default(),
        SyntaxKind::IfConfigDecl => node
            .child_of_kind(SyntaxKind::IfConfigClause)
            .and_then(|clause| clause.child_of_kind(SyntaxKind::IfConfigCondition))
            .map(|condition| SmolStr::new(condition.description()))
            .unwrap_or_default(),
        SyntaxKind::SwitchExpr => node
            .children()
            .find(|child| child.kind() == SyntaxKind::Expr)
            .map(|subject| SmolStr::new(subject.description()))
            .unwrap_or_default(),
        _ => keyword_of(node),
    }
}

/// Common surface of every declaration kind.
pub trait Declaration: fmt::Debug {
    /// The shared node and memoized properties.
    fn core(&self) -> &DeclCore;

    /// The declaration node.
    fn syntax(&self) -> &SyntaxNode {
        self.core().syntax()
    }

    /// The introducing keyword: `func`, `struct`, `#if`, `let`...
    fn keyword(&self) -> &str {
        self.core().keyword()
    }

    /// The declared name. Kinds without one use their keyword.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Attributes written before the declaration.
    fn attributes(&self) -> &[Attribute] {
        self.core().attributes()
    }

    /// Modifiers written before the keyword.
    fn modifiers(&self) -> &[Modifier] {
        self.core().modifiers()
    }

    /// Returns `true` if the modifier `name` is present.
    fn has_modifier(&self, name: &str) -> bool {
        self.modifiers().iter().any(|modifier| modifier.name == name)
    }

    /// Returns `true` if the attribute `name` (without `@`) is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|attribute| attribute.name == name)
    }

    /// The node text without surrounding trivia.
    fn description(&self) -> String {
        self.syntax().description()
    }

    /// The span from the first to the last significant token.
    fn range(&self) -> TextRange {
        self.syntax().trimmed_range()
    }

    /// Line and column span through the context's location service.
    fn location(&self) -> SourceLocation {
        self.core().context().location().locate(self.syntax())
    }
}
