//! Patterns in `case` labels, `catch` clauses, `for` loops and conditions.
//!
//! In a binding context (after `let`/`var`) a bare name is an
//! `IdentifierPattern`; elsewhere it is an expression to match against.
//! Enum-style patterns (`.some(let x)`, `Result.failure(_)`) keep their
//! structure as member accesses and calls whose arguments are patterns.

use crate::lexer::TokenKind;
use crate::parser::CompletedMarker;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::is_name_like;

impl Parser<'_, '_> {
    /// Parse a pattern. `binding` is `true` under `let`/`var`.
    pub(crate) fn parse_pattern(&mut self, binding: bool) -> Option<CompletedMarker> {
        let mut lhs = match self.current() {
            TokenKind::KwLet | TokenKind::KwVar => {
                let m = self.start();
                self.bump();
                self.parse_pattern(true);
                m.complete(self, SyntaxKind::ValueBindingPattern)
            }
            TokenKind::KwIs => {
                let m = self.start();
                self.bump();
                self.parse_type();
                m.complete(self, SyntaxKind::IsTypePattern)
            }
            TokenKind::Underscore if self.at_pattern_end(1) => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::WildcardPattern)
            }
            TokenKind::LParen => self.parse_tuple_pattern(binding),
            TokenKind::Ident if binding && self.at_pattern_end(1) => {
                let m = self.start();
                self.bump();
                m.complete(self, SyntaxKind::IdentifierPattern)
            }
            _ => self.parse_expression_pattern(binding)?,
        };

        if self.at(TokenKind::KwAs) {
            let m = lhs.precede(self);
            self.bump(); // as
            self.parse_type();
            lhs = m.complete(self, SyntaxKind::AsPattern);
        }

        Some(lhs)
    }

    /// Returns `true` if the nth token ahead ends a pattern.
    pub(crate) fn at_pattern_end(&self, n: usize) -> bool {
        matches!(
            self.peek_kind_n(n),
            TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::LBrace
                | TokenKind::Eq
                | TokenKind::KwWhere
                | TokenKind::KwIn
                | TokenKind::KwElse
                | TokenKind::KwAs
                | TokenKind::Semicolon
                | TokenKind::Eof
        )
    }

    fn parse_tuple_pattern(&mut self, binding: bool) -> CompletedMarker {
        let m = self.start();
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::TuplePatternElement);
            if self.current().is_argument_label()
                && self.current() != TokenKind::Underscore
                && self.peek_kind_n(1) == TokenKind::Colon
            {
                self.bump();
                self.bump();
            }
            let parsed = self.parse_pattern(binding).is_some();
            self.finish_node();

            if !parsed || !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close tuple pattern");
        m.complete(self, SyntaxKind::TuplePattern)
    }

    fn parse_expression_pattern(&mut self, binding: bool) -> Option<CompletedMarker> {
        if self.at_pattern_end(0) {
            self.error("expected pattern");
            return None;
        }

        let m = self.start();
        let primary = self.parse_pattern_primary(binding);
        if !self.at_pattern_end(0) {
            let expr = match primary {
                Some(primary) => primary.precede(self),
                None => self.start(),
            };
            self.parse_pattern_tokens();
            expr.complete(self, SyntaxKind::Expr);
        }
        Some(m.complete(self, SyntaxKind::ExpressionPattern))
    }

    fn parse_pattern_primary(&mut self, binding: bool) -> Option<CompletedMarker> {
        let kind = self.current();
        let mut lhs = if kind.is_literal() {
            let m = self.start();
            self.bump();
            return Some(m.complete(self, SyntaxKind::LiteralExpr));
        } else if kind == TokenKind::Operator
            && self.current_text() == "-"
            && !self.trivia_before(1)
            && matches!(
                self.peek_kind_n(1),
                TokenKind::IntLiteral | TokenKind::FloatLiteral
            )
        {
            let m = self.start();
            self.bump(); // -
            self.bump(); // number
            return Some(m.complete(self, SyntaxKind::LiteralExpr));
        } else if kind == TokenKind::Dot && is_name_like(self.peek_kind_n(1)) {
            let m = self.start();
            self.bump(); // .
            self.bump(); // member
            m.complete(self, SyntaxKind::MemberAccessExpr)
        } else if matches!(
            kind,
            TokenKind::Ident | TokenKind::KwSelf | TokenKind::KwCapitalSelf | TokenKind::KwSuper
        ) {
            let m = self.start();
            self.bump();
            m.complete(self, SyntaxKind::DeclReferenceExpr)
        } else {
            return None;
        };

        loop {
            if self.at(TokenKind::Dot) && is_name_like(self.peek_kind_n(1)) {
                let m = lhs.precede(self);
                self.bump(); // .
                self.bump(); // member
                lhs = m.complete(self, SyntaxKind::MemberAccessExpr);
            } else if self.at(TokenKind::LParen) && !self.trivia_before(0) {
                let m = lhs.precede(self);
                self.parse_pattern_arguments(binding);
                lhs = m.complete(self, SyntaxKind::FunctionCallExpr);
            } else {
                break;
            }
        }

        Some(lhs)
    }

    fn parse_pattern_arguments(&mut self, binding: bool) {
        self.start_node(SyntaxKind::LabeledExprList);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::LabeledExpr);
            if self.current().is_argument_label()
                && self.current() != TokenKind::Underscore
                && self.peek_kind_n(1) == TokenKind::Colon
            {
                self.bump();
                self.bump();
            }
            let parsed = self.parse_pattern(binding).is_some();
            self.finish_node();

            if !parsed || !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close pattern arguments");
        self.finish_node();
    }

    /// Consumes a balanced token run up to the end of the pattern.
    fn parse_pattern_tokens(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                TokenKind::Eof => break,
                TokenKind::LBrace if depth > 0 => self.parse_closure_expr(),
                TokenKind::LParen | TokenKind::LBracket => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::RParen | TokenKind::RBracket if depth > 0 => {
                    depth -= 1;
                    self.bump();
                }
                TokenKind::RBrace => break,
                _ if depth == 0 && self.at_pattern_end(0) => break,
                _ => self.bump(),
            }
        }
    }
}
