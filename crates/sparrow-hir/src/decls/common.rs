//! Parts shared by several declaration kinds.

use smol_str::SmolStr;
use sparrow_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeExt, ViewMode};

use crate::types::{classify, parameters_of, EntityType, Parameter};

/// `@name(arguments)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name without the `@`.
    pub name: SmolStr,
    /// Arguments in order; empty when there is no argument list.
    pub arguments: Vec<AttributeArgument>,
}

/// One attribute argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeArgument {
    /// `introduced` in `introduced: 13.0`.
    pub label: Option<SmolStr>,
    /// The value text.
    pub value: String,
}

/// A declaration modifier such as `public` or `private(set)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// `private`
    pub name: SmolStr,
    /// `set` in `private(set)`.
    pub detail: Option<SmolStr>,
}

/// One generic parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParameter {
    /// Parameter name.
    pub name: SmolStr,
    /// Conformance bound text, `Codable` in `T: Codable`.
    pub inherited_type: Option<SmolStr>,
    /// Declared with `each`.
    pub is_pack: bool,
}

/// How a generic requirement relates its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementRelation {
    /// `A == B`
    SameType,
    /// `A: B`
    Conformance,
    /// `T: _Trivial(64)`
    Layout,
}

/// One `where` clause requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRequirement {
    /// Left-hand type text. Always `Self` for layout requirements.
    pub left: SmolStr,
    /// Right-hand type or layout text.
    pub right: SmolStr,
    /// The relation between the sides.
    pub relation: RequirementRelation,
}

/// `async` and `throws` markers as written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectSpecifiers {
    /// `async` or `reasync`.
    pub async_specifier: Option<SmolStr>,
    /// `throws`, `rethrows` or `throws(E)`.
    pub throws_specifier: Option<SmolStr>,
}

impl EffectSpecifiers {
    /// Returns `true` if neither marker is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.async_specifier.is_none() && self.throws_specifier.is_none()
    }
}

/// Parameters, effects and return type of a function-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Parameters in order.
    pub input: Vec<Parameter>,
    /// Return type; `None` when no `->` is written.
    pub output: Option<EntityType>,
    /// Return type text.
    pub output_raw: Option<String>,
    /// `async`/`throws` markers.
    pub effects: EffectSpecifiers,
}

/// Accessor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// `get`
    Get,
    /// `set`
    Set,
    /// `willSet`
    WillSet,
    /// `didSet`
    DidSet,
    /// `_modify` or `modify`
    Modify,
    /// `_read` or `read`
    Read,
    /// `init`
    Init,
    /// `unsafeAddress`
    UnsafeAddress,
    /// `unsafeMutableAddress`
    UnsafeMutableAddress,
}

impl AccessorKind {
    /// Maps an accessor keyword to its kind.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "get" => Self::Get,
            "set" => Self::Set,
            "willSet" => Self::WillSet,
            "didSet" => Self::DidSet,
            "_modify" | "modify" => Self::Modify,
            "_read" | "read" => Self::Read,
            "init" => Self::Init,
            "unsafeAddress" => Self::UnsafeAddress,
            "unsafeMutableAddress" => Self::UnsafeMutableAddress,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for accessors that write the value.
    #[must_use]
    pub fn is_mutating_access(self) -> bool {
        matches!(
            self,
            Self::Set | Self::Modify | Self::Init | Self::UnsafeMutableAddress
        )
    }
}

/// One accessor of a property or subscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Which accessor this is.
    pub kind: AccessorKind,
    /// `mutating`, `nonmutating`, ...
    pub modifier: Option<SmolStr>,
    /// `async`/`throws` markers.
    pub effects: EffectSpecifiers,
    /// `newValue` in `set(newValue)`.
    pub parameter: Option<SmolStr>,
    /// Whether a body is written.
    pub has_body: bool,
}

pub(crate) fn attributes_in(node: &SyntaxNode, mode: ViewMode) -> Vec<Attribute> {
    node.children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::AttributeList)
        .flat_map(|list| list.children_in(mode).collect::<Vec<_>>())
        .filter(|child| child.kind() == SyntaxKind::Attribute)
        .map(|attribute| attribute_from(&attribute, mode))
        .collect()
}

fn attribute_from(node: &SyntaxNode, mode: ViewMode) -> Attribute {
    let name: String = node
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|token| !token.kind().is_trivia() && token.kind() != SyntaxKind::At)
        .map(|token| token.text().to_string())
        .collect();

    let arguments = node
        .child_of_kind(SyntaxKind::AttributeArguments)
        .map(|list| {
            list.children_in(mode)
                .filter(|child| child.kind() == SyntaxKind::AttributeArgument)
                .map(|argument| attribute_argument_from(&argument))
                .collect()
        })
        .unwrap_or_default();

    Attribute {
        name: name.into(),
        arguments,
    }
}

fn attribute_argument_from(node: &SyntaxNode) -> AttributeArgument {
    let mut tokens = node.tokens_in(ViewMode::SourceAccurate).peekable();
    let label = match (tokens.next(), tokens.peek()) {
        (Some(first), Some(second)) if second.kind() == SyntaxKind::Colon => {
            Some(SmolStr::new(first.text()))
        }
        _ => None,
    };

    let value = if label.is_some() {
        let start = node
            .token_of_kind(SyntaxKind::Colon)
            .map(|colon| colon.text_range().end());
        let text = node.text().to_string();
        let offset = start.map_or(0, |end| usize::from(end - node.text_range().start()));
        text.get(offset..).unwrap_or_default().trim().to_string()
    } else {
        node.description()
    };

    AttributeArgument { label, value }
}

pub(crate) fn modifiers_in(node: &SyntaxNode, mode: ViewMode) -> Vec<Modifier> {
    let Some(list) = node.child_of_kind(SyntaxKind::ModifierList) else {
        return Vec::new();
    };
    list.children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::Modifier)
        .filter_map(|modifier| {
            let name = modifier.first_significant_token()?;
            let detail = modifier.child_of_kind(SyntaxKind::ModifierDetail).and_then(|detail| {
                detail
                    .tokens_in(mode)
                    .find(|token| token.kind() == SyntaxKind::Ident)
                    .map(|token| SmolStr::new(token.text()))
            });
            Some(Modifier {
                name: name.text().into(),
                detail,
            })
        })
        .collect()
}

pub(crate) fn generic_parameters_in(node: &SyntaxNode, mode: ViewMode) -> Vec<GenericParameter> {
    let Some(clause) = node.child_of_kind(SyntaxKind::GenericParameterClause) else {
        return Vec::new();
    };
    clause
        .children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::GenericParameter)
        .filter_map(|parameter| {
            let name = parameter.child_of_kind(SyntaxKind::Name)?;
            let is_pack = parameter
                .token_of_kind(SyntaxKind::Ident)
                .is_some_and(|token| token.text() == "each");
            let inherited_type = parameter
                .children_in(mode)
                .find(|child| child.kind().is_type())
                .map(|ty| SmolStr::new(ty.description()));
            Some(GenericParameter {
                name: name.description().into(),
                inherited_type,
                is_pack,
            })
        })
        .collect()
}

/// Requirements from the declaration's `where` clause and from a `where`
/// inside its generic parameter clause.
pub(crate) fn generic_requirements_in(node: &SyntaxNode, mode: ViewMode) -> Vec<GenericRequirement> {
    let inner = node
        .child_of_kind(SyntaxKind::GenericParameterClause)
        .and_then(|clause| clause.child_of_kind(SyntaxKind::GenericWhereClause));
    let outer = node.child_of_kind(SyntaxKind::GenericWhereClause);

    inner
        .into_iter()
        .chain(outer)
        .flat_map(|clause| clause.children_in(mode).collect::<Vec<_>>())
        .filter_map(|requirement| requirement_from(&requirement, mode))
        .collect()
}

fn requirement_from(node: &SyntaxNode, mode: ViewMode) -> Option<GenericRequirement> {
    let relation = match node.kind() {
        SyntaxKind::SameTypeRequirement => RequirementRelation::SameType,
        SyntaxKind::ConformanceRequirement => RequirementRelation::Conformance,
        SyntaxKind::LayoutRequirement => RequirementRelation::Layout,
        _ => return None,
    };

    let mut types = node.children_in(mode).filter(|child| child.kind().is_type());
    let left_type = types.next()?;
    if relation == RequirementRelation::Layout {
        let colon = node.token_of_kind(SyntaxKind::Colon)?;
        let text = node.text().to_string();
        let offset = usize::from(colon.text_range().end() - node.text_range().start());
        return Some(GenericRequirement {
            left: SmolStr::new_inline("Self"),
            right: text.get(offset..).unwrap_or_default().trim().into(),
            relation,
        });
    }

    let right = types.next().map(|ty| ty.description()).unwrap_or_default();
    Some(GenericRequirement {
        left: left_type.description().into(),
        right: right.into(),
        relation,
    })
}

pub(crate) fn inheritance_in(node: &SyntaxNode, mode: ViewMode) -> Vec<SmolStr> {
    let Some(clause) = node.child_of_kind(SyntaxKind::InheritanceClause) else {
        return Vec::new();
    };
    clause
        .children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::InheritedType)
        .map(|inherited| SmolStr::new(inherited.description()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Reads an `EffectSpecifiers` node.
pub(crate) fn effects_from(node: &SyntaxNode) -> EffectSpecifiers {
    let mut effects = EffectSpecifiers::default();
    let mut throws: Option<String> = None;

    for element in node.children_with_tokens() {
        if let Some(token) = element.as_token() {
            if token.kind().is_trivia() {
                continue;
            }
            match token.kind() {
                SyntaxKind::KwThrows | SyntaxKind::KwRethrows => {
                    throws = Some(token.text().to_string());
                    continue;
                }
                SyntaxKind::Ident if matches!(token.text(), "async" | "reasync") => {
                    effects.async_specifier = Some(token.text().into());
                    if let Some(text) = throws.take() {
                        effects.throws_specifier = Some(text.into());
                    }
                    continue;
                }
                _ => {}
            }
        }
        if let Some(text) = throws.as_mut() {
            text.push_str(&element.to_string());
        }
    }

    if let Some(text) = throws {
        effects.throws_specifier = Some(text.trim().into());
    }
    effects
}

/// Effects attached directly to `node` through an `EffectSpecifiers` child.
pub(crate) fn effects_in(node: &SyntaxNode) -> EffectSpecifiers {
    node.child_of_kind(SyntaxKind::EffectSpecifiers)
        .map(|effects| effects_from(&effects))
        .unwrap_or_default()
}

/// Reads a `FunctionSignature` child of `node`.
pub(crate) fn signature_in(node: &SyntaxNode, mode: ViewMode) -> Signature {
    let Some(signature) = node.child_of_kind(SyntaxKind::FunctionSignature) else {
        return Signature::default();
    };

    let input = signature
        .child_of_kind(SyntaxKind::ParameterClause)
        .map(|clause| parameters_of(&clause, mode))
        .unwrap_or_default();
    let output_node = signature
        .child_of_kind(SyntaxKind::ReturnClause)
        .and_then(|clause| clause.children_in(mode).find(|child| child.kind().is_type()));

    Signature {
        input,
        output: output_node.as_ref().map(classify),
        output_raw: output_node.as_ref().map(|ty| ty.description()),
        effects: effects_in(&signature),
    }
}

/// Accessors written in an `AccessorBlock`. A block holding plain statements
/// is an implicit getter.
pub(crate) fn accessors_from(block: &SyntaxNode, mode: ViewMode) -> Vec<Accessor> {
    let accessors: Vec<_> = block
        .children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::Accessor)
        .filter_map(|accessor| accessor_from(&accessor, mode))
        .collect();
    if !accessors.is_empty() {
        return accessors;
    }

    vec![Accessor {
        kind: AccessorKind::Get,
        modifier: None,
        effects: EffectSpecifiers::default(),
        parameter: None,
        has_body: true,
    }]
}

fn accessor_from(node: &SyntaxNode, mode: ViewMode) -> Option<Accessor> {
    let keyword = node
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|token| !token.kind().is_trivia())?;
    let kind = AccessorKind::from_keyword(keyword.text())?;

    let modifier = modifiers_in(node, mode)
        .into_iter()
        .next()
        .map(|modifier| modifier.name);
    let parameter = node
        .child_of_kind(SyntaxKind::AccessorParameter)
        .and_then(|parameter| parameter.token_of_kind(SyntaxKind::Ident))
        .map(|token| SmolStr::new(token.text()));

    Some(Accessor {
        kind,
        modifier,
        effects: effects_in(node),
        parameter,
        has_body: node.child_of_kind(SyntaxKind::CodeBlock).is_some(),
    })
}

/// Text of the expression inside an `InitializerClause` child of `node`.
pub(crate) fn initializer_text(node: &SyntaxNode, mode: ViewMode) -> Option<String> {
    node.child_of_kind(SyntaxKind::InitializerClause)
        .and_then(|clause| clause.children_in(mode).next())
        .map(|value| value.description())
}
