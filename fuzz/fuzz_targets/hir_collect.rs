#![no_main]

use libfuzzer_sys::fuzz_target;
use sparrow_hir::{
    collect_declarations_from_source, location_of, Declaration, DeclarationCollection,
    ExplorerConfig, ViewMode,
};

const MAX_SOURCE_BYTES: usize = 4096;
const MAX_DEPTH: usize = 8;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn visit(declarations: &DeclarationCollection, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    for decl in declarations.all() {
        let _ = decl.keyword();
        let _ = decl.name();
        let _ = decl.attributes();
        let _ = decl.modifiers();
        let _ = location_of(decl);
    }
    for function in &declarations.functions {
        let _ = function.signature();
        visit(function.body(), depth + 1);
    }
    for variable in &declarations.variables {
        let _ = variable.ty();
        let _ = variable.accessors();
    }
    for structure in &declarations.structures {
        let _ = structure.generic_requirements();
        visit(structure.members(), depth + 1);
    }
    for class in &declarations.classes {
        visit(class.members(), depth + 1);
    }
    for enumeration in &declarations.enumerations {
        let _ = enumeration.cases();
        visit(enumeration.members(), depth + 1);
    }
    for protocol in &declarations.protocols {
        let _ = protocol.associated_types();
    }
    for switch in &declarations.switches {
        let _ = switch.cases();
        visit(switch.declarations(), depth + 1);
    }
    for block in &declarations.conditional_compilation_blocks {
        for branch in block.branches() {
            visit(&branch.declarations, depth + 1);
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&mode, rest)) = data.split_first() else {
        return;
    };
    let view_mode = if mode % 2 == 0 {
        ViewMode::SourceAccurate
    } else {
        ViewMode::FixedUp
    };
    let source = decode_source(rest);
    let config = ExplorerConfig::with_view_mode(view_mode);

    let first = collect_declarations_from_source(&source, &config);
    visit(&first, 0);
    let second = collect_declarations_from_source(&source, &config);
    assert_eq!(first, second);
});
