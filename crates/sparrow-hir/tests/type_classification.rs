mod common;
use common::*;

#[test]
fn test_tuple_normalization_at_any_depth() {
    for (wrapped, plain) in [
        ("()", "Void"),
        ("(())", "Void"),
        ("(Int)", "Int"),
        ("((Int))", "Int"),
        ("(((String)))", "String"),
        ("([Int])", "[Int]"),
        ("((Int) -> Void)", "(Int) -> Void"),
    ] {
        assert_eq!(type_of(wrapped), type_of(plain), "{wrapped} vs {plain}");
    }
    assert_eq!(type_of("()"), EntityType::void());
}

#[test]
fn test_collection_surface_equivalence() {
    for (sugar, generic) in [
        ("[Int]", "Array<Int>"),
        ("[Int]?", "Array<Int>?"),
        ("[String: Int]", "Dictionary<String, Int>"),
        ("[String: [Double]]", "Dictionary<String, Array<Double>>"),
        ("[(Int, Int)]", "Array<(Int, Int)>"),
    ] {
        let sugar = type_of(sugar);
        let generic = type_of(generic);
        assert_eq!(sugar.surface_form(), Some(SurfaceForm::Bracket));
        assert_eq!(generic.surface_form(), Some(SurfaceForm::Generic));
        assert_eq!(sugar.is_optional(), generic.is_optional());
        assert_eq!(sugar.with_form(SurfaceForm::Generic), generic);
    }
}

#[test]
fn test_set_matches_qualified_spelling() {
    let set = type_of("Set<Int>");
    assert_eq!(set, type_of("Swift.Set<Int>"));
    let EntityType::Set { element, .. } = set else {
        panic!("expected set");
    };
    assert_eq!(*element, EntityType::simple("Int"));
}

#[test]
fn test_function_scenario() {
    let declarations = collect_ok(r#"func f(_ a: Int, b: String = "x", _ c: [Int]?) -> Bool"#);
    assert_eq!(declarations.functions.len(), 1);
    let signature = declarations.functions[0].signature();
    assert_eq!(signature.input.len(), 3);

    let a = &signature.input[0];
    assert_eq!(a.label, None);
    assert!(a.is_label_omitted);
    assert_eq!(a.ty, EntityType::simple("Int"));

    let b = &signature.input[1];
    assert_eq!(b.label.as_deref(), Some("b"));
    assert_eq!(b.default_value.as_deref(), Some("\"x\""));
    assert_eq!(b.ty, EntityType::simple("String"));

    let c = &signature.input[2];
    assert_eq!(c.label, None);
    assert_eq!(
        c.ty,
        EntityType::Array {
            element: Box::new(EntityType::simple("Int")),
            form: SurfaceForm::Bracket,
            optional: true,
        }
    );
    assert!(c.is_optional());

    assert_eq!(signature.output, Some(EntityType::simple("Bool")));
}

#[test]
fn test_typealias_scenario() {
    let declarations = collect_ok("typealias X = (name: String, age: Int?)");
    let alias = &declarations.typealiases[0];
    assert_eq!(alias.name(), "X");
    let EntityType::Tuple { elements, optional } = alias.initialized_type() else {
        panic!("expected tuple, got {:?}", alias.initialized_type());
    };
    assert!(!optional);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].label.as_deref(), Some("name"));
    assert!(!elements[0].is_optional());
    assert_eq!(elements[1].label.as_deref(), Some("age"));
    assert!(elements[1].is_optional());
}

#[test]
fn test_result_and_closure_display() {
    assert_eq!(
        type_of("Result<Data, Error>"),
        EntityType::Result {
            success: Box::new(EntityType::simple("Data")),
            failure: Box::new(EntityType::simple("Error")),
            optional: false,
        }
    );
    assert_eq!(type_of("(Int, String) -> Bool").to_string(), "(Int, String) -> Bool");
    assert_eq!(type_of("[String: Int]").to_string(), "[String: Int]");
}

#[test]
fn test_missing_annotation_is_empty() {
    let declarations = collect_ok("let inferred = 42");
    assert!(declarations.variables[0].ty().is_empty());
}
