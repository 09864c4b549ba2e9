mod common;
use common::*;

fn case_items(source: &str) -> Vec<SyntaxNode> {
    nodes_of(&parse_ok(source), SyntaxKind::CaseItem)
}

#[test]
fn test_qualified_member_with_bindings() {
    let items = case_items("switch r {\ncase Result.success(let value): break\ndefault: break\n}");
    assert_eq!(items.len(), 1);
    let call = first_of(&items[0], SyntaxKind::FunctionCallExpr);
    assert_eq!(
        child_kinds(&call),
        vec![SyntaxKind::MemberAccessExpr, SyntaxKind::LabeledExprList]
    );
    assert_eq!(nodes_of(&call, SyntaxKind::IdentifierPattern).len(), 1);
}

#[test]
fn test_labeled_pattern_arguments() {
    let items = case_items("switch e {\ncase .moved(from: let a, to: _): break\ndefault: break\n}");
    let arguments = nodes_of(&items[0], SyntaxKind::LabeledExpr);
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments[0].text().to_string(), "from: let a");
}

#[test]
fn test_tuple_of_bindings() {
    let items = case_items("switch p {\ncase let (x, y): break\ncase (0, _): break\n}");
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0].children().next().map(|node| node.kind()),
        Some(SyntaxKind::ValueBindingPattern)
    );
    assert_eq!(nodes_of(&items[0], SyntaxKind::IdentifierPattern).len(), 2);
    assert_eq!(nodes_of(&items[1], SyntaxKind::WildcardPattern).len(), 1);
}

#[test]
fn test_negative_literal_and_string() {
    let items = case_items("switch n {\ncase -1, \"x\": break\ndefault: break\n}");
    assert_eq!(items.len(), 2);
    for item in &items {
        let pattern = item.children().next().expect("pattern");
        assert_eq!(pattern.kind(), SyntaxKind::ExpressionPattern);
        assert_eq!(
            pattern.children().next().map(|node| node.kind()),
            Some(SyntaxKind::LiteralExpr)
        );
    }
}

#[test]
fn test_where_clause_on_case() {
    let items = case_items("switch n {\ncase let x where x > 10: break\ndefault: break\n}");
    let clause = first_of(&items[0], SyntaxKind::WhereClause);
    assert_eq!(clause.text().to_string(), "where x > 10");
}

#[test]
fn test_if_case_and_for_case() {
    let root = parse_ok("if case .some(let v) = opt { }\nfor case let x? in xs { }");
    assert_eq!(nodes_of(&root, SyntaxKind::ValueBindingPattern).len(), 2);
    assert_eq!(nodes_of(&root, SyntaxKind::Condition).len(), 1);
}
