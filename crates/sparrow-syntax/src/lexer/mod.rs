//! Lexer for Swift source text.
//!
//! This module provides a lexer that tokenizes Swift source code into a
//! stream of tokens with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for Swift source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
///
/// Operator runs made only of `?`, `!` and `>` are split into single-character
/// tokens so that `Int?>`, `Array<Set<Int>>` and `T!)` stay parseable as types.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    pending: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            pending: VecDeque::new(),
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the text of the current token.
    #[must_use]
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }

    fn split_postfix_run(&mut self, start: usize, text: &str) {
        for (offset, ch) in text.char_indices() {
            let kind = match ch {
                '?' => TokenKind::Question,
                '!' => TokenKind::Exclamation,
                _ => TokenKind::Gt,
            };
            let at = start + offset;
            let range = TextRange::new(
                TextSize::from(at as u32),
                TextSize::from((at + 1) as u32),
            );
            self.pending.push_back(Token::new(kind, range));
        }
    }
}

fn is_postfix_run(text: &str) -> bool {
    text.len() > 1 && text.chars().all(|ch| matches!(ch, '?' | '!' | '>'))
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let kind = self.inner.next()?;
        let span = self.inner.span();

        let kind = kind.unwrap_or(TokenKind::Error);
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );

        if kind == TokenKind::Operator {
            let text = &self.source[span.start..span.end];
            if is_postfix_run(text) {
                self.split_postfix_run(span.start, text);
                return self.pending.pop_front();
            }
        }

        Some(Token::new(kind, range))
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_trivia(source: &str) -> Vec<(TokenKind, &str)> {
        lex_with_text(source)
            .into_iter()
            .filter(|(token, _)| !token.kind.is_trivia())
            .map(|(token, text)| (token.kind, text))
            .collect()
    }

    #[test]
    fn test_lexer_basic() {
        let tokens = non_trivia("let x: Int = 42");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::KwLet, "let"),
                (TokenKind::Ident, "x"),
                (TokenKind::Colon, ":"),
                (TokenKind::Ident, "Int"),
                (TokenKind::Eq, "="),
                (TokenKind::IntLiteral, "42"),
            ]
        );
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let tokens = lex("var abc");
        assert_eq!(tokens[0].range, TextRange::new(0.into(), 3.into()));
        assert_eq!(tokens[1].range, TextRange::new(3.into(), 4.into()));
        assert_eq!(tokens[2].range, TextRange::new(4.into(), 7.into()));
    }

    #[test]
    fn test_nested_generic_closers_split() {
        let kinds: Vec<_> = non_trivia("Array<Set<Int>>")
            .into_iter()
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::Gt,
            ]
        );
    }

    #[test]
    fn test_optional_inside_generic_splits() {
        let tokens = non_trivia("Array<Int?>");
        assert_eq!(tokens[3], (TokenKind::Question, "?"));
        assert_eq!(tokens[4], (TokenKind::Gt, ">"));
    }

    #[test]
    fn test_double_optional_splits() {
        let tokens = non_trivia("Int??");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Ident, "Int"),
                (TokenKind::Question, "?"),
                (TokenKind::Question, "?"),
            ]
        );
    }

    #[test]
    fn test_other_operators_stay_whole() {
        let tokens = non_trivia("a >= b != c");
        assert_eq!(tokens[1], (TokenKind::Operator, ">="));
        assert_eq!(tokens[3], (TokenKind::Operator, "!="));
    }

    #[test]
    fn test_full_declaration() {
        let source = r#"
@available(iOS 13, *)
public final class Store<Item: Codable>: ObservableObject where Item: Hashable {
    @Published private(set) var items: [Item] = []
    func add(_ item: Item) async throws -> Bool { true }
}
"#;
        let tokens = non_trivia(source);
        assert!(tokens.iter().any(|(kind, _)| *kind == TokenKind::KwClass));
        assert!(tokens.iter().any(|(kind, _)| *kind == TokenKind::KwWhere));
        assert!(tokens.iter().any(|(kind, _)| *kind == TokenKind::KwThrows));
        assert!(tokens.iter().any(|(kind, _)| *kind == TokenKind::Arrow));
        assert!(tokens
            .iter()
            .any(|(kind, text)| *kind == TokenKind::Ident && *text == "async"));
    }
}
