//! Case item classification.
//!
//! Each recognizer matches one pattern shape; they run in priority order and
//! anything none of them accepts is `Unsupported`.

use indexmap::IndexMap;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt, ViewMode};

use super::defs::{CaseItem, MatchedCase, SwitchCase, SwitchLabel};
use crate::types;

type Recognizer = fn(&SyntaxNode) -> Option<CaseItem>;

/// Tried in order; the first match wins.
const RECOGNIZERS: [Recognizer; 7] = [
    tuple,
    member,
    type_test,
    inner_value_binding_member,
    value_binding_member,
    value_binding,
    literal,
];

/// Classifies a `CaseItem` node, or a pattern node directly.
#[must_use]
pub fn classify(node: &SyntaxNode) -> CaseItem {
    let pattern = if node.kind() == SyntaxKind::CaseItem {
        node.children().find(|child| child.kind().is_pattern())
    } else {
        Some(node.clone())
    };

    pattern
        .and_then(|pattern| RECOGNIZERS.iter().find_map(|recognize| recognize(&pattern)))
        .unwrap_or_else(|| CaseItem::Unsupported(node.clone()))
}

pub(crate) fn switch_case_from(node: &SyntaxNode, mode: ViewMode) -> SwitchCase {
    let label = match node.child_of_kind(SyntaxKind::SwitchCaseLabel) {
        Some(label) => SwitchLabel::Case(
            label
                .children_in(mode)
                .filter(|child| child.kind() == SyntaxKind::CaseItem)
                .map(|item| MatchedCase {
                    item: classify(&item),
                    where_clause: item
                        .child_of_kind(SyntaxKind::WhereClause)
                        .and_then(|clause| clause.child_of_kind(SyntaxKind::Expr))
                        .map(|condition| condition.description()),
                })
                .collect(),
        ),
        None => SwitchLabel::Default,
    };
    SwitchCase {
        label,
        node: node.clone(),
    }
}

/// The only child node of `node`, if it has exactly one.
fn sole_child(node: &SyntaxNode) -> Option<SyntaxNode> {
    let mut children = node.children();
    let child = children.next()?;
    children.next().is_none().then_some(child)
}

/// `let`/`var` of a value-binding pattern.
fn binding_keyword(node: &SyntaxNode) -> Option<SmolStr> {
    node.first_significant_token()
        .filter(|token| matches!(token.kind(), SyntaxKind::KwLet | SyntaxKind::KwVar))
        .map(|token| SmolStr::new(token.text()))
}

/// `.name` or `Type.name`, with a leading dot dropped.
fn member_name(node: &SyntaxNode) -> Option<SmolStr> {
    if node.kind() != SyntaxKind::MemberAccessExpr {
        return None;
    }
    let text = node.description();
    Some(text.strip_prefix('.').unwrap_or(&text).into())
}

/// Splits an expression pattern holding `.member(args)` into the member
/// name and the pattern of each argument.
fn member_call(node: &SyntaxNode) -> Option<(SmolStr, Vec<Option<SyntaxNode>>)> {
    if node.kind() != SyntaxKind::ExpressionPattern {
        return None;
    }
    let call = sole_child(node).filter(|child| child.kind() == SyntaxKind::FunctionCallExpr)?;
    let name = call.children().next().as_ref().and_then(member_name)?;
    let arguments = call
        .child_of_kind(SyntaxKind::LabeledExprList)?
        .children()
        .filter(|child| child.kind() == SyntaxKind::LabeledExpr)
        .map(|argument| argument.children().find(|child| child.kind().is_pattern()))
        .collect();
    Some((name, arguments))
}

fn is_literal_pattern(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::ExpressionPattern
        && sole_child(node).is_some_and(|child| child.kind() == SyntaxKind::LiteralExpr)
}

/// `(1, 2)`
fn tuple(node: &SyntaxNode) -> Option<CaseItem> {
    if node.kind() != SyntaxKind::TuplePattern {
        return None;
    }
    let elements = node
        .children()
        .filter(|child| child.kind() == SyntaxKind::TuplePatternElement)
        .map(|element| SmolStr::new(element.description()))
        .collect();
    Some(CaseItem::Tuple(elements))
}

/// `.ready`
fn member(node: &SyntaxNode) -> Option<CaseItem> {
    if node.kind() != SyntaxKind::ExpressionPattern {
        return None;
    }
    sole_child(node)
        .as_ref()
        .and_then(member_name)
        .map(CaseItem::Member)
}

/// `is String`
fn type_test(node: &SyntaxNode) -> Option<CaseItem> {
    if node.kind() != SyntaxKind::IsTypePattern {
        return None;
    }
    let ty = node
        .children()
        .find(|child| child.kind().is_type())
        .map_or(types::EntityType::Empty, |ty| types::classify(&ty));
    Some(CaseItem::IsTypePattern(ty))
}

/// `.loaded(let data, _)`: bindings inside the arguments. Wildcards and
/// literals are skipped; any other argument shape rejects, and so does a call
/// that binds nothing.
fn inner_value_binding_member(node: &SyntaxNode) -> Option<CaseItem> {
    let (name, arguments) = member_call(node)?;

    let mut elements = IndexMap::new();
    for argument in arguments {
        let argument = argument?;
        match argument.kind() {
            SyntaxKind::ValueBindingPattern => {
                let keyword = binding_keyword(&argument)?;
                let bound = sole_child(&argument)
                    .filter(|child| child.kind() == SyntaxKind::IdentifierPattern)?;
                elements.insert(SmolStr::new(bound.description()), keyword);
            }
            SyntaxKind::WildcardPattern => {}
            _ if is_literal_pattern(&argument) => {}
            _ => return None,
        }
    }
    if elements.is_empty() {
        return None;
    }
    Some(CaseItem::InnerValueBindingMember { name, elements })
}

/// `let .loaded(data, _)`
fn value_binding_member(node: &SyntaxNode) -> Option<CaseItem> {
    if node.kind() != SyntaxKind::ValueBindingPattern {
        return None;
    }
    let keyword = binding_keyword(node)?;
    let inner = sole_child(node)?;

    if let Some(name) = member(&inner).and_then(|item| match item {
        CaseItem::Member(name) => Some(name),
        _ => None,
    }) {
        return Some(CaseItem::ValueBindingMember {
            keyword,
            name,
            elements: Vec::new(),
        });
    }

    let (name, arguments) = member_call(&inner)?;
    let elements = arguments
        .into_iter()
        .map(|argument| {
            argument
                .filter(|argument| {
                    matches!(
                        argument.kind(),
                        SyntaxKind::IdentifierPattern | SyntaxKind::WildcardPattern
                    )
                })
                .map(|argument| SmolStr::new(argument.description()))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(CaseItem::ValueBindingMember {
        keyword,
        name,
        elements,
    })
}

/// `let x`, `let x as T`, `let (a, _)`
fn value_binding(node: &SyntaxNode) -> Option<CaseItem> {
    if node.kind() != SyntaxKind::ValueBindingPattern {
        return None;
    }
    let keyword = binding_keyword(node)?;
    let inner = sole_child(node)?;

    let elements = match inner.kind() {
        SyntaxKind::IdentifierPattern => vec![SmolStr::new(inner.description())],
        SyntaxKind::AsPattern => {
            let bound = inner
                .children()
                .next()
                .filter(|child| child.kind() == SyntaxKind::IdentifierPattern)?;
            vec![SmolStr::new(bound.description())]
        }
        SyntaxKind::TuplePattern => inner
            .children()
            .filter(|child| child.kind() == SyntaxKind::TuplePatternElement)
            .map(|element| {
                sole_child(&element)
                    .filter(|child| {
                        matches!(
                            child.kind(),
                            SyntaxKind::IdentifierPattern | SyntaxKind::WildcardPattern
                        )
                    })
                    .map(|child| SmolStr::new(child.description()))
            })
            .collect::<Option<Vec<_>>>()?,
        _ => return None,
    };
    Some(CaseItem::ValueBinding { keyword, elements })
}

/// `1`, `-1`, `"x"`, `nil`
fn literal(node: &SyntaxNode) -> Option<CaseItem> {
    is_literal_pattern(node).then(|| CaseItem::Literal(SmolStr::new(node.description())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparrow_syntax::parse;

    fn classify_cases(source: &str) -> Vec<CaseItem> {
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        parse
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::CaseItem)
            .map(|item| classify(&item))
            .collect()
    }

    fn single(pattern: &str) -> CaseItem {
        let source = format!("switch value {{\ncase {pattern}: break\n}}");
        let mut items = classify_cases(&source);
        assert_eq!(items.len(), 1, "{pattern}");
        items.remove(0)
    }

    #[test]
    fn test_literals() {
        assert_eq!(single("1"), CaseItem::Literal("1".into()));
        assert_eq!(single("-1"), CaseItem::Literal("-1".into()));
        assert_eq!(single("\"x\""), CaseItem::Literal("\"x\"".into()));
        assert_eq!(single("nil"), CaseItem::Literal("nil".into()));
    }

    #[test]
    fn test_members() {
        assert_eq!(single(".ready"), CaseItem::Member("ready".into()));
        assert_eq!(single("State.ready"), CaseItem::Member("State.ready".into()));
    }

    #[test]
    fn test_type_test() {
        assert_eq!(
            single("is String"),
            CaseItem::IsTypePattern(crate::EntityType::simple("String"))
        );
    }

    #[test]
    fn test_inner_binding_wins_over_member_and_binding() {
        let mut expected = IndexMap::new();
        expected.insert(SmolStr::new("name"), SmolStr::new("let"));
        expected.insert(SmolStr::new("age"), SmolStr::new("var"));
        assert_eq!(
            single(".example(let name, var age)"),
            CaseItem::InnerValueBindingMember {
                name: "example".into(),
                elements: expected,
            }
        );
    }

    #[test]
    fn test_inner_binding_skips_wildcards_and_literals() {
        let CaseItem::InnerValueBindingMember { name, elements } = single(".pair(let a, _, 0)")
        else {
            panic!("expected inner binding");
        };
        assert_eq!(name, "pair");
        assert_eq!(elements.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_outer_binding_member() {
        assert_eq!(
            single("let .example(name, _)"),
            CaseItem::ValueBindingMember {
                keyword: "let".into(),
                name: "example".into(),
                elements: vec!["name".into(), "_".into()],
            }
        );
        assert_eq!(
            single("var .ready"),
            CaseItem::ValueBindingMember {
                keyword: "var".into(),
                name: "ready".into(),
                elements: Vec::new(),
            }
        );
    }

    #[test]
    fn test_value_bindings() {
        assert_eq!(
            single("let x as Thing"),
            CaseItem::ValueBinding {
                keyword: "let".into(),
                elements: vec!["x".into()],
            }
        );
        assert_eq!(
            single("let (a, _)"),
            CaseItem::ValueBinding {
                keyword: "let".into(),
                elements: vec!["a".into(), "_".into()],
            }
        );
    }

    #[test]
    fn test_tuple() {
        assert_eq!(
            single("(1, .ready)"),
            CaseItem::Tuple(vec!["1".into(), ".ready".into()])
        );
    }

    #[test]
    fn test_exotic_shapes_are_unsupported() {
        for pattern in [
            "1...5",
            "x",
            ".pair(let (a, b))",
            "let .pair(.inner)",
            ".foo()",
            ".pair(_, _)",
            ".code(404)",
        ] {
            let item = single(pattern);
            assert!(item.is_unsupported(), "{pattern}: {item:?}");
        }
    }

    #[test]
    fn test_switch_case_labels() {
        let parse = parse(
            "switch value {\ncase .a, .b where flag: break\ndefault: break\n}",
        );
        let cases: Vec<_> = parse
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::SwitchCase)
            .map(|node| switch_case_from(&node, ViewMode::SourceAccurate))
            .collect();
        assert_eq!(
            cases[0].label,
            SwitchLabel::Case(vec![
                MatchedCase {
                    item: CaseItem::Member("a".into()),
                    where_clause: None,
                },
                MatchedCase {
                    item: CaseItem::Member("b".into()),
                    where_clause: Some("flag".to_string()),
                },
            ])
        );
        assert!(cases[1].is_default());
    }
}
