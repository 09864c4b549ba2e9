//! Shared helpers for declaration tests.
#![allow(dead_code, unused_imports)]

pub use sparrow_hir::types::classify;
pub use sparrow_hir::*;
pub use sparrow_syntax::{parse, SyntaxKind, SyntaxNode};

/// Routes collector logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collects `source` with the default config; fails the test if the source
/// does not parse cleanly.
pub fn collect_ok(source: &str) -> DeclarationCollection {
    let errors = parse(source).errors().to_vec();
    assert!(errors.is_empty(), "unexpected parse errors {errors:?}\n{source}");
    collect_declarations_from_source(source, &ExplorerConfig::default())
}

/// Collects `source` skipping error-recovery nodes.
pub fn collect_fixed_up(source: &str) -> DeclarationCollection {
    collect_declarations_from_source(source, &ExplorerConfig::with_view_mode(ViewMode::FixedUp))
}

/// Classifies the annotated type of `let value: <ty>`.
pub fn type_of(ty: &str) -> EntityType {
    collect_ok(&format!("let value: {ty}")).variables[0].ty().clone()
}

/// Classifies the first case item of `switch v { case <pattern>: break }`.
pub fn case_of(pattern: &str) -> CaseItem {
    let source = format!("switch v {{\ncase {pattern}:\n    break\n}}");
    let declarations = collect_ok(&source);
    let cases = declarations.switches[0].cases();
    match &cases[0].label {
        SwitchLabel::Case(items) => items[0].item.clone(),
        SwitchLabel::Default => panic!("expected a case label in:\n{source}"),
    }
}
