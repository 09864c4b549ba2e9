//! Shared helpers for parser tests.
#![allow(dead_code, unused_imports)]

pub use sparrow_syntax::parser::parse;
pub use sparrow_syntax::syntax::{SyntaxKind, SyntaxNode};

/// Parses `source` and fails the test on any parse error.
pub fn parse_ok(source: &str) -> SyntaxNode {
    let parsed = parse(source);
    assert!(
        parsed.ok(),
        "unexpected errors: {:?}\n{}",
        parsed.errors(),
        parsed.debug_tree()
    );
    parsed.syntax()
}

/// All nodes of `kind` in source order.
pub fn nodes_of(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    root.descendants().filter(|node| node.kind() == kind).collect()
}

/// The first node of `kind`; fails the test when there is none.
pub fn first_of(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} node in:\n{root:#?}"))
}

/// Kinds of the direct child nodes of `node`.
pub fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|child| child.kind()).collect()
}

/// Kinds of the top-level items of a file.
pub fn item_kinds(source: &str) -> Vec<SyntaxKind> {
    child_kinds(&parse_ok(source))
}
