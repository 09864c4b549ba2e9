mod common;
use common::*;

fn annotated_type(source: &str) -> SyntaxNode {
    let root = parse_ok(source);
    first_of(&root, SyntaxKind::TypeAnnotation)
        .children()
        .next()
        .expect("annotated type")
}

#[test]
fn test_tuple_type_elements() {
    let ty = annotated_type("let t: (x: Int, _ y: String, Double...)");
    assert_eq!(ty.kind(), SyntaxKind::TupleType);
    assert_eq!(nodes_of(&ty, SyntaxKind::TupleTypeElement).len(), 3);
}

#[test]
fn test_empty_tuple_is_void_shape() {
    let ty = annotated_type("let t: ()");
    assert_eq!(ty.kind(), SyntaxKind::TupleType);
    assert_eq!(ty.children().count(), 0);
}

#[test]
fn test_closure_returning_optional_closure() {
    let ty = annotated_type("var f: (Int) -> ((String) -> Void)?");
    assert_eq!(ty.kind(), SyntaxKind::FunctionType);
    let ret = first_of(&ty, SyntaxKind::ReturnClause);
    assert_eq!(
        ret.children().next().map(|node| node.kind()),
        Some(SyntaxKind::OptionalType)
    );
}

#[test]
fn test_typed_throws_in_function_type() {
    let ty = annotated_type("let f: () throws(MyError) -> Int");
    assert_eq!(ty.kind(), SyntaxKind::FunctionType);
    assert_eq!(
        first_of(&ty, SyntaxKind::EffectSpecifiers).text().to_string(),
        "throws(MyError)"
    );
}

#[test]
fn test_generic_collection_names() {
    let ty = annotated_type("let s: Set<Array<Dictionary<String, Int>>>");
    assert_eq!(ty.kind(), SyntaxKind::SimpleType);
    assert_eq!(nodes_of(&ty, SyntaxKind::GenericArgumentClause).len(), 3);
}

#[test]
fn test_double_optional() {
    let ty = annotated_type("let v: Int??");
    assert_eq!(ty.kind(), SyntaxKind::OptionalType);
    assert_eq!(
        ty.children().next().map(|node| node.kind()),
        Some(SyntaxKind::OptionalType)
    );
}

#[test]
fn test_inout_parameter_type() {
    let root = parse_ok("func swap(_ a: inout Int, _ b: inout Int) {}");
    let attributed = nodes_of(&root, SyntaxKind::AttributedType);
    assert_eq!(attributed.len(), 2);
    assert_eq!(attributed[0].text().to_string(), "inout Int");
}

#[test]
fn test_any_existential_with_composition() {
    let ty = annotated_type("let v: any Codable & Sendable");
    assert_eq!(ty.kind(), SyntaxKind::SomeOrAnyType);
    assert_eq!(
        ty.children().next().map(|node| node.kind()),
        Some(SyntaxKind::CompositionType)
    );
}
