//! `#if` blocks and `switch` statements.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt};

use super::base::{DeclCore, Declaration};
use crate::collector::{collect_entering_at, DeclarationCollection};
use crate::context::ExplorerContext;
use crate::patterns::{switch_case_from, SwitchCase};

/// One `#if`, `#elseif` or `#else` clause.
#[derive(Debug, PartialEq)]
pub struct IfConfigBranch {
    /// `#if`, `#elseif` or `#else`.
    pub keyword: SmolStr,
    /// Condition text; `None` for `#else`.
    pub condition: Option<String>,
    /// Declarations inside the clause.
    pub declarations: DeclarationCollection,
}

/// `#if ... #elseif ... #else ... #endif`
pub struct ConditionalCompilationBlock {
    core: DeclCore,
    branches: OnceCell<Vec<IfConfigBranch>>,
}

impl ConditionalCompilationBlock {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            branches: OnceCell::new(),
        }
    }

    /// Clauses in source order, each with its own declarations.
    #[must_use]
    pub fn branches(&self) -> &[IfConfigBranch] {
        self.branches.get_or_init(|| {
            let ctx = self.core.context();
            self.syntax()
                .children_in(ctx.view_mode())
                .filter(|child| child.kind() == SyntaxKind::IfConfigClause)
                .map(|clause| IfConfigBranch {
                    keyword: clause
                        .first_significant_token()
                        .map(|token| SmolStr::new(token.text()))
                        .unwrap_or_default(),
                    condition: clause
                        .child_of_kind(SyntaxKind::IfConfigCondition)
                        .map(|condition| condition.description()),
                    declarations: collect_entering_at(&clause, ctx),
                })
                .collect()
        })
    }
}

/// A `switch` statement or expression.
pub struct SwitchExpression {
    core: DeclCore,
    cases: OnceCell<Vec<SwitchCase>>,
    declarations: OnceCell<DeclarationCollection>,
}

impl SwitchExpression {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
            cases: OnceCell::new(),
            declarations: OnceCell::new(),
        }
    }

    /// The value being matched, as written.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.name()
    }

    /// `case` and `default` sections in source order.
    #[must_use]
    pub fn cases(&self) -> &[SwitchCase] {
        self.cases.get_or_init(|| {
            let mode = self.core.view_mode();
            self.syntax()
                .descendants()
                .filter(|node| node.kind() == SyntaxKind::SwitchCase)
                .filter(|node| {
                    node.ancestors()
                        .skip(1)
                        .find(|ancestor| ancestor.kind() == SyntaxKind::SwitchExpr)
                        .is_some_and(|owner| owner == *self.syntax())
                })
                .filter(|node| mode.includes(node))
                .map(|node| switch_case_from(&node, mode))
                .collect()
        })
    }

    /// Declarations inside the case bodies, collected on first access.
    #[must_use]
    pub fn declarations(&self) -> &DeclarationCollection {
        self.declarations
            .get_or_init(|| self.core.collect_below(Some(self.syntax())))
    }
}

impl_declaration!(ConditionalCompilationBlock, SwitchExpression);

impl PartialEq for ConditionalCompilationBlock {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core && self.branches() == other.branches()
    }
}

impl PartialEq for SwitchExpression {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.cases() == other.cases()
            && self.declarations() == other.declarations()
    }
}

impl fmt::Debug for ConditionalCompilationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalCompilationBlock")
            .field("branches", &self.branches())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SwitchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchExpression")
            .field("subject", &self.subject())
            .field("cases", &self.cases())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        collect_declarations_from_source, CaseItem, Declaration, DeclarationCollection,
        ExplorerConfig, SwitchLabel,
    };

    fn collect(source: &str) -> DeclarationCollection {
        collect_declarations_from_source(source, &ExplorerConfig::default())
    }

    #[test]
    fn test_if_config_branches() {
        let declarations = collect(
            "#if os(iOS)\nimport UIKit\n#elseif canImport(AppKit)\nimport AppKit\nfunc mac() {}\n#else\nlet fallback = 0\n#endif",
        );
        let block = &declarations.conditional_compilation_blocks[0];
        assert_eq!(block.keyword(), "#if");
        let branches = block.branches();
        assert_eq!(branches.len(), 3);
        assert_eq!(branches[0].keyword, "#if");
        assert_eq!(branches[0].condition.as_deref(), Some("os(iOS)"));
        assert_eq!(branches[0].declarations.imports.len(), 1);
        assert_eq!(branches[1].keyword, "#elseif");
        assert_eq!(branches[1].declarations.functions.len(), 1);
        assert_eq!(branches[2].keyword, "#else");
        assert_eq!(branches[2].condition, None);
        assert_eq!(branches[2].declarations.variables.len(), 1);

        assert!(declarations.imports.is_empty());
        assert!(declarations.functions.is_empty());
    }

    #[test]
    fn test_switch_cases_and_nested_declarations() {
        let declarations = collect(
            "func run(state: State) {\n    switch state {\n    case .idle, .paused where flag:\n        let x = 1\n        switch x {\n        case 1: break\n        default: break\n        }\n    case let .failed(error):\n        print(error)\n    default:\n        break\n    }\n}",
        );
        let body = declarations.functions[0].body();
        assert_eq!(body.switches.len(), 1);
        let outer = &body.switches[0];
        assert_eq!(outer.subject(), "state");

        let cases = outer.cases();
        assert_eq!(cases.len(), 3);
        let SwitchLabel::Case(items) = &cases[0].label else {
            panic!("expected case label");
        };
        assert_eq!(items[0].item, CaseItem::Member("idle".into()));
        assert_eq!(items[1].where_clause.as_deref(), Some("flag"));
        assert!(matches!(
            cases[1].label,
            SwitchLabel::Case(ref items) if matches!(items[0].item, CaseItem::ValueBindingMember { .. })
        ));
        assert!(cases[2].is_default());

        let nested = outer.declarations();
        assert_eq!(nested.variables.len(), 1);
        assert_eq!(nested.switches.len(), 1);
        assert_eq!(nested.switches[0].cases().len(), 2);
    }
}
