//! Type classification.
//!
//! Rules, in priority order:
//! 1. Named types, with `Void`, `Result`, `Array`, `Dictionary`, `Set` and
//!    `Optional` (optionally `Swift.`-qualified) treated specially
//! 2. Tuples, after collapsing `()` to `Void` and `(T)` to `T`
//! 3. Function types, with optional/escaping found by an ancestor walk
//! 4. Optional wrappers, unwrapped and tagged optional
//! 5. Attributed types, unwrapped
//! 6. Everything else is `Empty`

use smol_str::SmolStr;
use sparrow_syntax::{
    next_significant_token, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeExt, SyntaxToken,
    ViewMode,
};

use super::defs::{ClosureType, EntityType, Parameter, SurfaceForm};
use crate::decls::{attributes_in, effects_in, initializer_text};

/// Classifies a type node.
#[must_use]
pub fn classify(node: &SyntaxNode) -> EntityType {
    match node.kind() {
        SyntaxKind::SimpleType => classify_simple(node),
        SyntaxKind::TupleType => classify_tuple(node),
        SyntaxKind::FunctionType => EntityType::Closure(classify_function(node)),
        SyntaxKind::OptionalType | SyntaxKind::ImplicitlyUnwrappedOptionalType => {
            wrapped_type(node).map_or(EntityType::Empty, |inner| {
                classify(&inner).with_optional(true)
            })
        }
        SyntaxKind::AttributedType => {
            wrapped_type(node).map_or(EntityType::Empty, |base| classify(&base))
        }
        SyntaxKind::ArrayType => {
            let element = wrapped_type(node).map_or(EntityType::Empty, |ty| classify(&ty));
            EntityType::Array {
                element: Box::new(element),
                form: SurfaceForm::Bracket,
                optional: false,
            }
            .with_optional(has_trailing_optional_marker(node))
        }
        SyntaxKind::DictionaryType => {
            let mut types = node.children().filter(|child| child.kind().is_type());
            let key = types.next().map_or(EntityType::Empty, |ty| classify(&ty));
            let value = types.next().map_or(EntityType::Empty, |ty| classify(&ty));
            EntityType::Dictionary {
                key: Box::new(key),
                value: Box::new(value),
                form: SurfaceForm::Bracket,
                optional: false,
            }
            .with_optional(has_trailing_optional_marker(node))
        }
        _ => EntityType::Empty,
    }
}

fn wrapped_type(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind().is_type())
}

/// The token after the node is `?` or `!`.
///
/// A `)` right after the node closes an enclosing tuple, so the marker (if
/// any) belongs to that tuple instead.
fn has_trailing_optional_marker(node: &SyntaxNode) -> bool {
    node.last_significant_token()
        .as_ref()
        .and_then(next_significant_token)
        .is_some_and(|token| {
            matches!(
                token.kind(),
                SyntaxKind::Question | SyntaxKind::Exclamation
            )
        })
}

fn classify_simple(node: &SyntaxNode) -> EntityType {
    let optional = has_trailing_optional_marker(node);
    let (base, arguments) = generic_form(node);
    let base = base.strip_prefix("Swift.").unwrap_or(&base);

    let boxed = |ty: Option<&SyntaxNode>| Box::new(ty.map_or(EntityType::Empty, classify));
    let ty = match (base, arguments.as_slice()) {
        ("Void", []) => EntityType::void(),
        ("Result", arguments) => EntityType::Result {
            success: boxed(arguments.first()),
            failure: boxed(arguments.get(1)),
            optional: false,
        },
        ("Array", [element]) => EntityType::Array {
            element: boxed(Some(element)),
            form: SurfaceForm::Generic,
            optional: false,
        },
        ("Dictionary", [key, value]) => EntityType::Dictionary {
            key: boxed(Some(key)),
            value: boxed(Some(value)),
            form: SurfaceForm::Generic,
            optional: false,
        },
        ("Set", [element]) => EntityType::Set {
            element: boxed(Some(element)),
            form: SurfaceForm::Generic,
            optional: false,
        },
        ("Optional", [wrapped]) => classify(wrapped).with_optional(true),
        _ => EntityType::simple(node.description()),
    };
    ty.with_optional(optional)
}

/// Splits `Swift.Array<Int>` into `"Swift.Array"` and its argument types.
///
/// Names with arguments in the middle (`Outer<T>.Inner`) are returned whole
/// with no arguments.
fn generic_form(node: &SyntaxNode) -> (String, Vec<SyntaxNode>) {
    let mut base = String::new();
    let mut arguments = None;

    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Token(token) if token.kind().is_trivia() => {}
            SyntaxElement::Token(token) => {
                if arguments.is_some() {
                    return (node.description(), Vec::new());
                }
                base.push_str(token.text());
            }
            SyntaxElement::Node(child) if child.kind() == SyntaxKind::GenericArgumentClause => {
                if arguments.is_some() {
                    return (node.description(), Vec::new());
                }
                arguments = Some(
                    child
                        .children()
                        .filter(|argument| argument.kind() == SyntaxKind::GenericArgument)
                        .filter_map(|argument| wrapped_type(&argument))
                        .collect(),
                );
            }
            SyntaxElement::Node(_) => return (node.description(), Vec::new()),
        }
    }

    (base, arguments.unwrap_or_default())
}

fn classify_tuple(node: &SyntaxNode) -> EntityType {
    let elements: Vec<_> = node
        .children()
        .filter(|child| child.kind() == SyntaxKind::TupleTypeElement)
        .collect();

    match elements.as_slice() {
        [] => EntityType::void(),
        [only] if only.token_of_kind(SyntaxKind::Ellipsis).is_none() => {
            wrapped_type(only).map_or(EntityType::Empty, |inner| classify(&inner))
        }
        _ => EntityType::Tuple {
            elements: elements
                .iter()
                .map(|element| parameter_from_element(element, true, ViewMode::SourceAccurate))
                .collect(),
            optional: false,
        },
    }
}

fn classify_function(node: &SyntaxNode) -> ClosureType {
    let input = node
        .child_of_kind(SyntaxKind::TupleType)
        .map(|tuple| {
            tuple
                .children()
                .filter(|child| child.kind() == SyntaxKind::TupleTypeElement)
                .map(|element| parameter_from_element(&element, true, ViewMode::SourceAccurate))
                .collect()
        })
        .unwrap_or_default();
    let output = node
        .child_of_kind(SyntaxKind::ReturnClause)
        .and_then(|clause| wrapped_type(&clause))
        .map_or(EntityType::Empty, |ty| classify(&ty));
    let (optional, is_escaping) = closure_wrapping(node);

    ClosureType {
        input,
        output: Box::new(output),
        effects: effects_in(node),
        is_escaping,
        optional,
    }
}

/// Walks up from a function type through the wrappers that can carry its
/// optional marker or `@escaping` attribute.
///
/// Stops at the first ancestor that is not one of: tuple element, a tuple
/// holding only that element, attributed type, optional wrapper. An
/// enclosing function type is always a stop.
fn closure_wrapping(node: &SyntaxNode) -> (bool, bool) {
    let mut optional = false;
    let mut escaping = false;

    for ancestor in node.ancestors().skip(1) {
        match ancestor.kind() {
            SyntaxKind::OptionalType | SyntaxKind::ImplicitlyUnwrappedOptionalType => {
                optional = true;
            }
            SyntaxKind::AttributedType => {
                escaping |= attributes_in(&ancestor, ViewMode::SourceAccurate)
                    .iter()
                    .any(|attribute| attribute.name == "escaping");
            }
            SyntaxKind::TupleTypeElement => {}
            SyntaxKind::TupleType
                if ancestor
                    .children()
                    .filter(|child| child.kind() == SyntaxKind::TupleTypeElement)
                    .count()
                    == 1 => {}
            _ => break,
        }
    }

    (optional, escaping)
}

/// Parameters of a `ParameterClause`.
#[must_use]
pub fn parameters_of(clause: &SyntaxNode, mode: ViewMode) -> Vec<Parameter> {
    clause
        .children_in(mode)
        .filter(|child| child.kind() == SyntaxKind::Parameter)
        .map(|parameter| parameter_from_syntax(&parameter, mode))
        .collect()
}

/// Resolves one function, subscript or closure `Parameter` node.
#[must_use]
pub fn parameter_from_syntax(node: &SyntaxNode, mode: ViewMode) -> Parameter {
    parameter_from_element(node, false, mode)
}

/// Resolves one associated value of an enum case.
#[must_use]
pub fn parameter_from_enum_case(node: &SyntaxNode, mode: ViewMode) -> Parameter {
    parameter_from_element(node, true, mode)
}

/// Shared by parameters, tuple elements and associated values. Names before
/// a `:` are label and internal name; without a `:` a bare name only counts
/// for parameters, where it is an untyped closure parameter.
fn parameter_from_element(node: &SyntaxNode, names_need_colon: bool, mode: ViewMode) -> Parameter {
    let mut names: Vec<SyntaxToken> = Vec::new();
    let mut saw_colon = false;
    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Token(token) if token.kind().is_trivia() => {}
            SyntaxElement::Token(token) if token.kind() == SyntaxKind::Colon => {
                saw_colon = true;
                break;
            }
            SyntaxElement::Token(token) if token.kind() != SyntaxKind::Ellipsis => {
                names.push(token);
            }
            SyntaxElement::Token(_) => {}
            SyntaxElement::Node(child) if child.kind().is_type() => break,
            SyntaxElement::Node(_) => {}
        }
    }
    if names_need_colon && !saw_colon {
        names.clear();
    }

    let named = |token: &SyntaxToken| (token.text() != "_").then(|| SmolStr::new(token.text()));
    let (label, name, is_label_omitted) = match names.as_slice() {
        [only] => (named(only), named(only), only.text() == "_"),
        [external, internal, ..] => (named(external), named(internal), external.text() == "_"),
        [] => (None, None, false),
    };

    let type_node = node.children_in(mode).find(|child| child.kind().is_type());
    let mut attributes = attributes_in(node, mode);
    if let Some(ty) = type_node
        .as_ref()
        .filter(|ty| ty.kind() == SyntaxKind::AttributedType)
    {
        attributes.extend(attributes_in(ty, mode));
    }
    let is_inout = type_node.as_ref().is_some_and(|ty| {
        ty.kind() == SyntaxKind::AttributedType && ty.token_of_kind(SyntaxKind::KwInout).is_some()
    });

    Parameter {
        label,
        name,
        ty: type_node.as_ref().map_or(EntityType::Empty, classify),
        type_text: type_node.as_ref().map(|ty| ty.description()),
        is_variadic: node.token_of_kind(SyntaxKind::Ellipsis).is_some(),
        is_inout,
        default_value: initializer_text(node, mode),
        attributes,
        is_label_omitted,
    }
}
