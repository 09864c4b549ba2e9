mod common;
use common::*;

fn assert_lossless(source: &str) {
    let parsed = parse(source);
    assert_eq!(parsed.syntax().text().to_string(), source);
}

#[test]
fn test_missing_closing_brace() {
    let source = "struct S {\n    var a: Int\n";
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert_lossless(source);
    assert!(parsed
        .syntax()
        .descendants()
        .any(|node| node.kind() == SyntaxKind::VariableDecl));
}

#[test]
fn test_missing_type_after_colon() {
    let parsed = parse("let x: = 1\nlet y = 2");
    assert!(!parsed.ok());
    assert_eq!(
        parsed
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::VariableDecl)
            .count(),
        2
    );
}

#[test]
fn test_stray_closers_at_top_level() {
    let source = ") ] }\nfunc f() {}";
    let parsed = parse(source);
    assert_eq!(parsed.errors().len(), 3);
    assert_lossless(source);
    assert!(parsed
        .syntax()
        .descendants()
        .any(|node| node.kind() == SyntaxKind::FunctionDecl));
}

#[test]
fn test_unterminated_string() {
    let source = "let s = \"open\nlet t = 1";
    assert_lossless(source);
    assert!(parse(source)
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::VariableDecl)
        .count()
        >= 2);
}

#[test]
fn test_unclosed_if_config() {
    let source = "#if DEBUG\nlet a = 1\n";
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert_lossless(source);
    assert_eq!(
        parsed.errors()[0].message,
        "expected '#endif'"
    );
}

#[test]
fn test_statement_in_protocol_body() {
    let source = "protocol P {\n    print(1)\n    func f()\n}";
    let parsed = parse(source);
    assert!(!parsed.ok());
    let block = parsed
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::MemberBlock)
        .expect("member block");
    assert_eq!(
        child_kinds(&block),
        vec![SyntaxKind::Unexpected, SyntaxKind::FunctionDecl]
    );
}

#[test]
fn test_garbage_never_hangs() {
    for source in [
        "@@@",
        "func",
        "struct",
        "case",
        "((((",
        "}}}}",
        "#else #endif",
        "let (",
        "var x: [Int: ",
        "switch { case",
        "enum E { case a( }",
        "extension { }",
        "{ in }",
        "x ? y",
        "subscript",
    ] {
        assert_lossless(source);
    }
}
