mod common;
use common::*;
use expect_test::expect;

#[test]
fn test_import_tree() {
    let parsed = parse("import Foundation");
    expect![[r#"
        SourceFile@0..17
          ImportDecl@0..17
            KwImport@0..6 "import"
            ImportPath@7..17
              Ident@7..17 "Foundation"
    "#]]
    .assert_eq(&parsed.debug_tree());
}

#[test]
fn test_optional_variable_tree() {
    let parsed = parse("let x: Int?");
    expect![[r#"
        SourceFile@0..11
          VariableDecl@0..11
            KwLet@0..3 "let"
            PatternBindingList@4..11
              PatternBinding@4..11
                IdentifierPattern@4..5
                  Ident@4..5 "x"
                TypeAnnotation@5..11
                  Colon@5..6 ":"
                  OptionalType@7..11
                    SimpleType@7..10
                      Ident@7..10 "Int"
                    Question@10..11 "?"
    "#]]
    .assert_eq(&parsed.debug_tree());
}

#[test]
fn test_every_declaration_kind_at_top_level() {
    let source = r#"
import struct Foundation.URL
class C {}
struct S {}
enum E { case a }
actor A {}
protocol P {}
extension S: P {}
func f() {}
let v = 1
typealias T = Int
prefix operator +++
precedencegroup Tight { associativity: left }
#if DEBUG
#endif
"#;
    assert_eq!(
        item_kinds(source),
        vec![
            SyntaxKind::ImportDecl,
            SyntaxKind::ClassDecl,
            SyntaxKind::StructDecl,
            SyntaxKind::EnumDecl,
            SyntaxKind::ActorDecl,
            SyntaxKind::ProtocolDecl,
            SyntaxKind::ExtensionDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::VariableDecl,
            SyntaxKind::TypeAliasDecl,
            SyntaxKind::OperatorDecl,
            SyntaxKind::PrecedenceGroupDecl,
            SyntaxKind::IfConfigDecl,
        ]
    );
}

#[test]
fn test_members_of_a_class() {
    let source = r#"
@MainActor
open class ViewModel<State>: Base, Observable where State: Equatable {
    @Published private(set) var state: State
    static let shared = ViewModel()
    init(state: State) { self.state = state }
    convenience init?() { return nil }
    deinit {}
    subscript(index: Int) -> State { get { state } set { } }
    func update(_ newState: State) async throws -> Bool { true }
    typealias Handler = (State) -> Void
    class func make() -> Self { fatalError() }
}
"#;
    let root = parse_ok(source);
    let block = first_of(&root, SyntaxKind::MemberBlock);
    assert_eq!(
        child_kinds(&block),
        vec![
            SyntaxKind::VariableDecl,
            SyntaxKind::VariableDecl,
            SyntaxKind::InitializerDecl,
            SyntaxKind::InitializerDecl,
            SyntaxKind::DeinitializerDecl,
            SyntaxKind::SubscriptDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::TypeAliasDecl,
            SyntaxKind::FunctionDecl,
        ]
    );

    let class = first_of(&root, SyntaxKind::ClassDecl);
    assert_eq!(
        child_kinds(&class),
        vec![
            SyntaxKind::AttributeList,
            SyntaxKind::ModifierList,
            SyntaxKind::Name,
            SyntaxKind::GenericParameterClause,
            SyntaxKind::InheritanceClause,
            SyntaxKind::GenericWhereClause,
            SyntaxKind::MemberBlock,
        ]
    );
}

#[test]
fn test_modifier_detail() {
    let root = parse_ok("struct S { public private(set) var count = 0 }");
    let modifiers = nodes_of(&root, SyntaxKind::Modifier);
    assert_eq!(modifiers.len(), 2);
    assert_eq!(modifiers[1].text().to_string(), "private(set)");
    assert_eq!(nodes_of(&root, SyntaxKind::ModifierDetail).len(), 1);
}

#[test]
fn test_enum_cases() {
    let source = r#"
indirect enum Tree<Value> {
    case leaf
    case node(left: Tree, value: Value, Tree), empty
    case raw = "r"
}
"#;
    let root = parse_ok(source);
    assert_eq!(nodes_of(&root, SyntaxKind::EnumCaseDecl).len(), 3);
    assert_eq!(nodes_of(&root, SyntaxKind::EnumCaseElement).len(), 4);
    assert_eq!(nodes_of(&root, SyntaxKind::EnumCaseParameter).len(), 3);
    assert_eq!(nodes_of(&root, SyntaxKind::InitializerClause).len(), 1);
}

#[test]
fn test_protocol_requirements() {
    let source = r#"
protocol Repository<Entity>: AnyObject {
    associatedtype Entity: Identifiable = Item where Entity.ID: Hashable
    var count: Int { get }
    func fetch(id: Entity.ID) async throws -> Entity?
    init(store: Store)
    subscript(key: String) -> Entity? { get set }
    static func make() -> Self
}
"#;
    let root = parse_ok(source);
    let block = first_of(&root, SyntaxKind::MemberBlock);
    assert_eq!(
        child_kinds(&block),
        vec![
            SyntaxKind::AssociatedTypeDecl,
            SyntaxKind::VariableDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::InitializerDecl,
            SyntaxKind::SubscriptDecl,
            SyntaxKind::FunctionDecl,
        ]
    );
    assert_eq!(nodes_of(&root, SyntaxKind::Accessor).len(), 3);
}

#[test]
fn test_operator_and_precedence_group() {
    let source = r#"
infix operator <~> : ComposePrecedence
precedencegroup ComposePrecedence {
    higherThan: AdditionPrecedence, MultiplicationPrecedence
    associativity: left
    assignment: false
}
"#;
    let root = parse_ok(source);
    let operator = first_of(&root, SyntaxKind::OperatorDecl);
    assert_eq!(first_of(&operator, SyntaxKind::Name).text().to_string(), "<~>");
    assert_eq!(
        first_of(&operator, SyntaxKind::OperatorPrecedenceClause)
            .text()
            .to_string(),
        ": ComposePrecedence"
    );
    assert_eq!(nodes_of(&root, SyntaxKind::PrecedenceGroupAttribute).len(), 3);
}

#[test]
fn test_nested_if_config_at_top_level() {
    let source = "#if os(iOS)\nimport UIKit\n#if DEBUG\nlet debug = true\n#endif\n#else\nimport AppKit\n#endif\n";
    let root = parse_ok(source);
    assert_eq!(nodes_of(&root, SyntaxKind::IfConfigDecl).len(), 2);
    assert_eq!(nodes_of(&root, SyntaxKind::ImportDecl).len(), 2);
}

#[test]
fn test_attribute_arguments() {
    let root = parse_ok("@available(iOS, introduced: 13.0, message: \"x\")\nfunc f() {}");
    assert_eq!(nodes_of(&root, SyntaxKind::AttributeArgument).len(), 3);
}
