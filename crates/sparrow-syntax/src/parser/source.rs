//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations. Lookahead always
//! skips trivia, but the parser can ask whether trivia (or a newline)
//! separates two tokens, which Swift uses to tell `a?` from `a ? b : c`
//! and to end statements.

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    cursor: usize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a new source from tokens and source text.
    pub fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            tokens,
            source,
            cursor: 0,
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub fn current_token(&self) -> Option<&Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the current non-trivia token kind.
    pub fn peek_kind(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Peeks at the nth non-trivia token ahead.
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n).map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub fn peek_token_n(&self, n: usize) -> Option<&Token> {
        self.index_of_n(n).map(|index| &self.tokens[index])
    }

    /// Returns the text of the nth non-trivia token ahead, or `""` at end.
    pub fn peek_text_n(&self, n: usize) -> &'src str {
        self.peek_token_n(n).map_or("", |token| self.text_of(token))
    }

    /// Returns the text of the current token.
    pub fn current_text(&self) -> &'src str {
        self.peek_text_n(0)
    }

    /// Returns `true` if trivia separates the nth non-trivia token from the
    /// token before it.
    pub fn trivia_before_n(&self, n: usize) -> bool {
        self.gap_before_n(n).next().is_some()
    }

    /// Returns `true` if a line break separates the nth non-trivia token from
    /// the token before it.
    pub fn newline_before_n(&self, n: usize) -> bool {
        self.gap_before_n(n)
            .any(|token| self.text_of(token).contains('\n'))
    }

    /// Advances past the current token.
    pub fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                self.cursor += 1;
                break;
            }
            self.cursor += 1;
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.peek_kind_n(0) == TokenKind::Eof
    }

    /// Returns the source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the raw cursor position, used to detect parser progress.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn index_of_n(&self, n: usize) -> Option<usize> {
        let mut non_trivia_seen = 0;
        for (index, token) in self.tokens.iter().enumerate().skip(self.cursor) {
            if token.kind.is_trivia() {
                continue;
            }
            if non_trivia_seen == n {
                return Some(index);
            }
            non_trivia_seen += 1;
        }
        None
    }

    /// Trivia tokens directly preceding the nth non-trivia token ahead.
    fn gap_before_n(&self, n: usize) -> impl Iterator<Item = &Token> {
        let end = self.index_of_n(n).unwrap_or(self.tokens.len());
        let start = self.tokens[..end]
            .iter()
            .rposition(|token| !token.kind.is_trivia())
            .map_or(0, |index| index + 1);
        self.tokens[start..end].iter()
    }

    fn text_of(&self, token: &Token) -> &'src str {
        &self.source[usize::from(token.range.start())..usize::from(token.range.end())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_lookahead_skips_trivia() {
        let text = "let /* c */ x\n= 1";
        let tokens = lex(text);
        let source = Source::new(&tokens, text);
        assert_eq!(source.peek_kind_n(0), TokenKind::KwLet);
        assert_eq!(source.peek_kind_n(1), TokenKind::Ident);
        assert_eq!(source.peek_text_n(1), "x");
        assert_eq!(source.peek_kind_n(3), TokenKind::IntLiteral);
        assert_eq!(source.peek_kind_n(4), TokenKind::Eof);
    }

    #[test]
    fn test_trivia_and_newline_queries() {
        let text = "a?\nb ? c";
        let tokens = lex(text);
        let mut source = Source::new(&tokens, text);
        assert!(!source.trivia_before_n(1));
        assert!(source.newline_before_n(2));
        assert!(!source.newline_before_n(3));
        assert!(source.trivia_before_n(3));
        source.bump();
        source.bump();
        assert_eq!(source.current_text(), "b");
        assert!(source.newline_before_n(0));
    }
}
