//! Case item shapes and the `switch` cases that carry them.

use indexmap::IndexMap;
use smol_str::SmolStr;
use sparrow_syntax::{SyntaxNode, SyntaxNodeExt};

use crate::types::EntityType;

/// The shape of one `case` item.
#[derive(Debug, Clone)]
pub enum CaseItem {
    /// `case 1`, `case "x"`, `case nil`
    Literal(SmolStr),
    /// `case .ready`; the name is stored without the leading dot.
    Member(SmolStr),
    /// `case is String`
    IsTypePattern(EntityType),
    /// `case let .loaded(data, _)`; wildcards are kept as `_`.
    ValueBindingMember {
        /// `let` or `var`.
        keyword: SmolStr,
        /// Member name without the leading dot.
        name: SmolStr,
        /// Bound names in argument order.
        elements: Vec<SmolStr>,
    },
    /// `case .loaded(let data, var count)`
    InnerValueBindingMember {
        /// Member name without the leading dot.
        name: SmolStr,
        /// Bound name to its `let`/`var` keyword, in argument order.
        elements: IndexMap<SmolStr, SmolStr>,
    },
    /// `case let x`, `case let x as T`, `case let (a, b)`
    ValueBinding {
        /// `let` or `var`.
        keyword: SmolStr,
        /// Bound names; wildcards are kept as `_`.
        elements: Vec<SmolStr>,
    },
    /// `case (1, 2)`; the element texts in order.
    Tuple(Vec<SmolStr>),
    /// Any other shape. Holds the `case` item node.
    Unsupported(SyntaxNode),
}

impl CaseItem {
    /// Returns `true` for [`CaseItem::Unsupported`].
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl PartialEq for CaseItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) | (Self::Member(a), Self::Member(b)) => a == b,
            (Self::IsTypePattern(a), Self::IsTypePattern(b)) => a == b,
            (
                Self::ValueBindingMember {
                    keyword,
                    name,
                    elements,
                },
                Self::ValueBindingMember {
                    keyword: other_keyword,
                    name: other_name,
                    elements: other_elements,
                },
            ) => keyword == other_keyword && name == other_name && elements == other_elements,
            (
                Self::InnerValueBindingMember { name, elements },
                Self::InnerValueBindingMember {
                    name: other_name,
                    elements: other_elements,
                },
            ) => name == other_name && elements.iter().eq(other_elements.iter()),
            (
                Self::ValueBinding { keyword, elements },
                Self::ValueBinding {
                    keyword: other_keyword,
                    elements: other_elements,
                },
            ) => keyword == other_keyword && elements == other_elements,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Unsupported(a), Self::Unsupported(b)) => a.description() == b.description(),
            _ => false,
        }
    }
}

impl Eq for CaseItem {}

/// One item of a `case` label with its `where` guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedCase {
    /// The classified pattern.
    pub item: CaseItem,
    /// Text of the `where` condition.
    pub where_clause: Option<String>,
}

/// The label of a switch case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchLabel {
    /// `default:`
    Default,
    /// `case a, b where c:`
    Case(Vec<MatchedCase>),
}

/// One `case`/`default` section of a switch.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// The classified label.
    pub label: SwitchLabel,
    /// The `SwitchCase` node.
    pub node: SyntaxNode,
}

impl SwitchCase {
    /// Returns `true` for a `default:` section.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.label == SwitchLabel::Default
    }
}

impl PartialEq for SwitchCase {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.node.description() == other.node.description()
    }
}

impl Eq for SwitchCase {}
