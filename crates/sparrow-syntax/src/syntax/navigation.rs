//! View-mode aware navigation over syntax nodes.

use text_size::TextRange;

use super::{SyntaxKind, SyntaxNode, SyntaxToken};

/// How much of a possibly malformed tree a traversal looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Every parsed element is visited, including `Unexpected` recovery nodes.
    #[default]
    SourceAccurate,
    /// `Unexpected` recovery nodes and everything below them are skipped.
    FixedUp,
}

impl ViewMode {
    /// Returns `true` if `node` is visible in this mode.
    #[must_use]
    pub fn includes(self, node: &SyntaxNode) -> bool {
        self == Self::SourceAccurate || node.kind() != SyntaxKind::Unexpected
    }

    /// Returns `true` if `token` is visible in this mode.
    #[must_use]
    pub fn includes_token(self, token: &SyntaxToken) -> bool {
        self == Self::SourceAccurate
            || !token
                .parent_ancestors()
                .any(|node| node.kind() == SyntaxKind::Unexpected)
    }
}

/// Navigation helpers on [`SyntaxNode`].
pub trait SyntaxNodeExt {
    /// Child nodes visible in `mode`.
    fn children_in(&self, mode: ViewMode) -> impl Iterator<Item = SyntaxNode>;

    /// Non-trivia tokens below this node that are visible in `mode`.
    fn tokens_in(&self, mode: ViewMode) -> impl Iterator<Item = SyntaxToken>;

    /// First child node of the given kind.
    fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode>;

    /// First direct token child of the given kind.
    fn token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken>;

    /// First token that is not whitespace or a comment.
    fn first_significant_token(&self) -> Option<SyntaxToken>;

    /// Last token that is not whitespace or a comment.
    fn last_significant_token(&self) -> Option<SyntaxToken>;

    /// The node text with leading and trailing trivia removed.
    fn description(&self) -> String;

    /// The range from the first to the last significant token.
    fn trimmed_range(&self) -> TextRange;
}

impl SyntaxNodeExt for SyntaxNode {
    fn children_in(&self, mode: ViewMode) -> impl Iterator<Item = SyntaxNode> {
        self.children().filter(move |node| mode.includes(node))
    }

    fn tokens_in(&self, mode: ViewMode) -> impl Iterator<Item = SyntaxToken> {
        self.descendants_with_tokens()
            .filter_map(rowan::NodeOrToken::into_token)
            .filter(move |token| !token.kind().is_trivia() && mode.includes_token(token))
    }

    fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|node| node.kind() == kind)
    }

    fn token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.children_with_tokens()
            .filter_map(rowan::NodeOrToken::into_token)
            .find(|token| token.kind() == kind)
    }

    fn first_significant_token(&self) -> Option<SyntaxToken> {
        let mut token = self.first_token()?;
        while token.kind().is_trivia() {
            token = token.next_token()?;
        }
        self.text_range()
            .contains_range(token.text_range())
            .then_some(token)
    }

    fn last_significant_token(&self) -> Option<SyntaxToken> {
        let mut token = self.last_token()?;
        while token.kind().is_trivia() {
            token = token.prev_token()?;
        }
        self.text_range()
            .contains_range(token.text_range())
            .then_some(token)
    }

    fn description(&self) -> String {
        self.text().to_string().trim().to_string()
    }

    fn trimmed_range(&self) -> TextRange {
        match (self.first_significant_token(), self.last_significant_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.text_range().start(), last.text_range().end())
            }
            _ => self.text_range(),
        }
    }
}

/// The next token after `token` that is not whitespace or a comment.
#[must_use]
pub fn next_significant_token(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut next = token.next_token()?;
    while next.kind().is_trivia() {
        next = next.next_token()?;
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_fixed_up_skips_unexpected() {
        let parse = parse("struct S { ) var a = 1 }");
        let block = parse
            .syntax()
            .descendants()
            .find(|node| node.kind() == SyntaxKind::MemberBlock)
            .expect("member block");

        let accurate: Vec<_> = block
            .children_in(ViewMode::SourceAccurate)
            .map(|node| node.kind())
            .collect();
        let fixed: Vec<_> = block
            .children_in(ViewMode::FixedUp)
            .map(|node| node.kind())
            .collect();

        assert_eq!(accurate, vec![SyntaxKind::Unexpected, SyntaxKind::VariableDecl]);
        assert_eq!(fixed, vec![SyntaxKind::VariableDecl]);
        assert!(block
            .tokens_in(ViewMode::FixedUp)
            .all(|token| token.kind() != SyntaxKind::RParen));
    }

    #[test]
    fn test_significant_tokens_and_description() {
        let parse = parse("\n  // lead\n  let x = 1  \n");
        let root = parse.syntax();
        assert_eq!(
            root.first_significant_token().map(|t| t.kind()),
            Some(SyntaxKind::KwLet)
        );
        assert_eq!(
            root.last_significant_token().map(|t| t.kind()),
            Some(SyntaxKind::IntLiteral)
        );
        assert_eq!(root.trimmed_range(), TextRange::new(13.into(), 22.into()));
        assert_eq!(root.description(), "// lead\n  let x = 1");
    }

    #[test]
    fn test_next_significant_token_skips_comments() {
        let parse = parse("let a: Int /* c */ ? = nil");
        let int = parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(rowan::NodeOrToken::into_token)
            .find(|token| token.text() == "Int")
            .expect("Int token");
        assert_eq!(
            next_significant_token(&int).map(|t| t.kind()),
            Some(SyntaxKind::Question)
        );
    }
}
