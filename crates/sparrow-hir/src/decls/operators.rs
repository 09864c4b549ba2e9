//! Operator and precedence group declarations.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use sparrow_syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeExt};

use super::base::{DeclCore, Declaration};
use crate::context::ExplorerContext;

/// Returns `true` if `c` may start an operator.
#[must_use]
pub fn is_operator_head(c: char) -> bool {
    matches!(
        c,
        '/' | '='
            | '-'
            | '+'
            | '!'
            | '*'
            | '%'
            | '<'
            | '>'
            | '&'
            | '|'
            | '^'
            | '~'
            | '?'
            | '\u{00A1}'..='\u{00A7}'
            | '\u{00A9}'
            | '\u{00AB}'
            | '\u{00AC}'
            | '\u{00AE}'
            | '\u{00B0}'..='\u{00B1}'
            | '\u{00B6}'
            | '\u{00BB}'
            | '\u{00BF}'
            | '\u{00D7}'
            | '\u{00F7}'
            | '\u{2016}'..='\u{2017}'
            | '\u{2020}'..='\u{2027}'
            | '\u{2030}'..='\u{203E}'
            | '\u{2041}'..='\u{2053}'
            | '\u{2055}'..='\u{205E}'
            | '\u{2190}'..='\u{23FF}'
            | '\u{2500}'..='\u{2775}'
            | '\u{2794}'..='\u{2BFF}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3020}'
            | '\u{3030}'
    )
}

/// Returns `true` if `c` may appear after the first character of an operator.
#[must_use]
pub fn is_operator_character(c: char) -> bool {
    is_operator_head(c)
        || matches!(
            c,
            '\u{0300}'..='\u{036F}'
                | '\u{1DC0}'..='\u{1DFF}'
                | '\u{20D0}'..='\u{20FF}'
                | '\u{FE00}'..='\u{FE0F}'
                | '\u{FE20}'..='\u{FE2F}'
                | '\u{E0100}'..='\u{E01EF}'
        )
}

/// Returns `true` if `text` is a well-formed operator name.
#[must_use]
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_operator_head) && chars.all(is_operator_character)
}

/// Fixity of an operator declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperatorKind {
    /// `prefix operator`
    Prefix,
    /// `postfix operator`
    Postfix,
    /// `infix operator`, also assumed when no fixity is written.
    #[default]
    Infix,
}

/// `infix operator <~> : ComparisonPrecedence`
pub struct Operator {
    core: DeclCore,
}

impl Operator {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
        }
    }

    /// Fixity from the `prefix`/`postfix`/`infix` modifier.
    #[must_use]
    pub fn kind(&self) -> OperatorKind {
        self.modifiers()
            .iter()
            .find_map(|modifier| match modifier.name.as_str() {
                "prefix" => Some(OperatorKind::Prefix),
                "postfix" => Some(OperatorKind::Postfix),
                "infix" => Some(OperatorKind::Infix),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The precedence group after `:`.
    #[must_use]
    pub fn precedence_group(&self) -> Option<SmolStr> {
        self.syntax()
            .child_of_kind(SyntaxKind::OperatorPrecedenceClause)
            .and_then(|clause| clause.token_of_kind(SyntaxKind::Ident))
            .map(|token| SmolStr::new(token.text()))
    }

    /// Returns `true` if the declared name is a well-formed operator.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_identifier(self.name())
    }
}

/// Associativity of a precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Associativity {
    /// `associativity: left`
    Left,
    /// `associativity: right`
    Right,
    /// `associativity: none`, or no associativity written.
    #[default]
    None,
}

/// `precedencegroup Name { higherThan: A  associativity: left }`
pub struct PrecedenceGroup {
    core: DeclCore,
}

impl PrecedenceGroup {
    pub(crate) fn new(node: SyntaxNode, ctx: Arc<ExplorerContext>) -> Self {
        Self {
            core: DeclCore::new(node, ctx),
        }
    }

    /// Values of the attribute `label`, in order.
    fn attribute_values(&self, label: &str) -> Vec<SmolStr> {
        self.syntax()
            .children()
            .filter(|child| child.kind() == SyntaxKind::PrecedenceGroupAttribute)
            .filter(|attribute| {
                attribute
                    .first_significant_token()
                    .is_some_and(|token| token.text() == label)
            })
            .flat_map(|attribute| {
                attribute
                    .children_with_tokens()
                    .filter_map(SyntaxElement::into_token)
                    .filter(|token| !token.kind().is_trivia())
                    .skip(2)
                    .filter(|token| token.kind() != SyntaxKind::Comma)
                    .map(|token| SmolStr::new(token.text()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Groups this one binds tighter than.
    #[must_use]
    pub fn higher_than(&self) -> Vec<SmolStr> {
        self.attribute_values("higherThan")
    }

    /// Groups this one binds looser than.
    #[must_use]
    pub fn lower_than(&self) -> Vec<SmolStr> {
        self.attribute_values("lowerThan")
    }

    /// `associativity:`; [`Associativity::None`] when absent.
    #[must_use]
    pub fn associativity(&self) -> Associativity {
        match self.attribute_values("associativity").first().map(SmolStr::as_str) {
            Some("left") => Associativity::Left,
            Some("right") => Associativity::Right,
            _ => Associativity::None,
        }
    }

    /// `assignment: true`
    #[must_use]
    pub fn assignment(&self) -> bool {
        self.attribute_values("assignment")
            .first()
            .is_some_and(|value| value == "true")
    }
}

impl_declaration!(Operator, PrecedenceGroup);

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.kind() == other.kind()
            && self.precedence_group() == other.precedence_group()
    }
}

impl PartialEq for PrecedenceGroup {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
            && self.higher_than() == other.higher_than()
            && self.lower_than() == other.lower_than()
            && self.associativity() == other.associativity()
            && self.assignment() == other.assignment()
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("precedence_group", &self.precedence_group())
            .finish()
    }
}

impl fmt::Debug for PrecedenceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrecedenceGroup")
            .field("name", &self.name())
            .field("associativity", &self.associativity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collect_declarations_from_source, DeclarationCollection, ExplorerConfig};

    fn collect(source: &str) -> DeclarationCollection {
        collect_declarations_from_source(source, &ExplorerConfig::default())
    }

    #[test]
    fn test_valid_identifiers() {
        for text in ["+", "==", "<~>", "√", "±", "→", "+\u{0301}"] {
            assert!(is_valid_identifier(text), "{text}");
        }
        for text in ["", "abc", "1+1", "+a", "\u{0301}+", "a+"] {
            assert!(!is_valid_identifier(text), "{text}");
        }
    }

    #[test]
    fn test_valid_operator_characters_each_pass() {
        for text in ["<~>", "&&&", "±="] {
            assert!(text.chars().skip(1).all(is_operator_character));
        }
    }

    #[test]
    fn test_operator_declarations() {
        let declarations = collect(
            "prefix operator +++\ninfix operator <~> : ComparisonPrecedence\noperator ***",
        );
        let operators = &declarations.operators;
        assert_eq!(operators[0].kind(), OperatorKind::Prefix);
        assert_eq!(operators[0].name(), "+++");
        assert!(operators[0].is_valid());
        assert_eq!(operators[1].kind(), OperatorKind::Infix);
        assert_eq!(
            operators[1].precedence_group().as_deref(),
            Some("ComparisonPrecedence")
        );
        assert_eq!(operators[2].kind(), OperatorKind::Infix);
        assert_eq!(operators[2].precedence_group(), None);
        assert_eq!(operators[2].keyword(), "operator");
    }

    #[test]
    fn test_precedence_group() {
        let declarations = collect(
            "precedencegroup Pipe {\n    higherThan: AdditionPrecedence, CastingPrecedence\n    lowerThan: MultiplicationPrecedence\n    associativity: left\n    assignment: true\n}\nprecedencegroup Plain {}",
        );
        let pipe = &declarations.precedence_groups[0];
        assert_eq!(pipe.name(), "Pipe");
        assert_eq!(pipe.higher_than(), ["AdditionPrecedence", "CastingPrecedence"]);
        assert_eq!(pipe.lower_than(), ["MultiplicationPrecedence"]);
        assert_eq!(pipe.associativity(), Associativity::Left);
        assert!(pipe.assignment());

        let plain = &declarations.precedence_groups[1];
        assert_eq!(plain.associativity(), Associativity::None);
        assert!(!plain.assignment());
        assert!(plain.higher_than().is_empty());
    }
}
