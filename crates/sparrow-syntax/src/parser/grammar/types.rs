//! Type expressions.
//!
//! Handles:
//! - Identifier and member types with generic arguments: `Swift.Array<Int>`
//! - Sugar: `[T]`, `[K: V]`, `T?`, `T!`
//! - Tuples and function types: `(a: Int, String)`, `(Int) async throws -> Bool`
//! - Attributed types: `inout T`, `@escaping () -> Void`
//! - `some P`, `any P`, `A & B`, `T.Type`

use crate::lexer::TokenKind;
use crate::parser::CompletedMarker;
use crate::syntax::SyntaxKind;

use super::super::Parser;

const TYPE_SPECIFIERS: &[&str] = &[
    "borrowing",
    "consuming",
    "__owned",
    "__shared",
    "sending",
    "isolated",
];

impl Parser<'_, '_> {
    /// Parse a type. Returns `None` (after recording an error) when no type starts here.
    pub(crate) fn parse_type(&mut self) -> Option<CompletedMarker> {
        if self.at_type_specifier() || self.at(TokenKind::At) {
            let m = self.start();
            while self.at_type_specifier() {
                self.bump();
            }
            self.parse_attributes();
            self.parse_type();
            return Some(m.complete(self, SyntaxKind::AttributedType));
        }

        if (self.at_contextual("some") || self.at_contextual("any"))
            && self.at_type_start(1)
            && !self.newline_before(1)
        {
            let m = self.start();
            self.bump();
            self.parse_composition_type();
            return Some(m.complete(self, SyntaxKind::SomeOrAnyType));
        }

        self.parse_composition_type()
    }

    fn at_type_specifier(&self) -> bool {
        if self.at(TokenKind::KwInout) {
            return true;
        }
        self.at(TokenKind::Ident)
            && TYPE_SPECIFIERS.contains(&self.current_text())
            && (self.at_type_start(1) || self.peek_kind_n(1) == TokenKind::At)
    }

    fn at_type_start(&self, n: usize) -> bool {
        matches!(
            self.peek_kind_n(n),
            TokenKind::Ident | TokenKind::KwCapitalSelf | TokenKind::LParen | TokenKind::LBracket
        )
    }

    fn parse_composition_type(&mut self) -> Option<CompletedMarker> {
        let first = self.parse_postfix_type()?;
        if !self.at(TokenKind::Amp) {
            return Some(first);
        }

        let m = first.precede(self);
        while self.eat(TokenKind::Amp) {
            self.parse_postfix_type();
        }
        Some(m.complete(self, SyntaxKind::CompositionType))
    }

    fn parse_postfix_type(&mut self) -> Option<CompletedMarker> {
        let mut lhs = self.parse_primary_type()?;

        if lhs.kind(self) == Some(SyntaxKind::TupleType) && self.at_function_type_tail() {
            let m = lhs.precede(self);
            if self.at_effect_specifier() {
                self.parse_effect_specifiers();
            }
            self.parse_return_clause();
            lhs = m.complete(self, SyntaxKind::FunctionType);
        }

        loop {
            let kind = match self.current() {
                TokenKind::Question if !self.trivia_before(0) => SyntaxKind::OptionalType,
                TokenKind::Exclamation if !self.trivia_before(0) => {
                    SyntaxKind::ImplicitlyUnwrappedOptionalType
                }
                TokenKind::Dot
                    if self.nth_contextual(1, "Type") || self.nth_contextual(1, "Protocol") =>
                {
                    let m = lhs.precede(self);
                    self.bump(); // .
                    self.bump(); // Type / Protocol
                    lhs = m.complete(self, SyntaxKind::MetatypeType);
                    continue;
                }
                _ => break,
            };
            let m = lhs.precede(self);
            self.bump();
            lhs = m.complete(self, kind);
        }

        Some(lhs)
    }

    fn at_function_type_tail(&self) -> bool {
        let mut n = 0;
        loop {
            match self.peek_kind_n(n) {
                TokenKind::Arrow => return true,
                TokenKind::KwThrows | TokenKind::KwRethrows => {
                    n += 1;
                    if self.peek_kind_n(n) == TokenKind::LParen && !self.trivia_before(n) {
                        n = self.skip_balanced(n);
                    }
                }
                TokenKind::Ident
                    if self.nth_contextual(n, "async") || self.nth_contextual(n, "reasync") =>
                {
                    n += 1;
                }
                _ => return false,
            }
        }
    }

    fn parse_primary_type(&mut self) -> Option<CompletedMarker> {
        match self.current() {
            TokenKind::Ident | TokenKind::KwCapitalSelf | TokenKind::Underscore => {
                Some(self.parse_simple_type())
            }
            TokenKind::LBracket => Some(self.parse_collection_type()),
            TokenKind::LParen => Some(self.parse_tuple_type()),
            _ => {
                self.error("expected type");
                None
            }
        }
    }

    fn parse_simple_type(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump(); // name

        if self.at(TokenKind::Lt) && !self.trivia_before(0) {
            self.parse_generic_argument_clause();
        }
        while self.at(TokenKind::Dot)
            && matches!(self.peek_kind_n(1), TokenKind::Ident | TokenKind::KwCapitalSelf)
            && !self.nth_contextual(1, "Type")
            && !self.nth_contextual(1, "Protocol")
        {
            self.bump(); // .
            self.bump(); // member name
            if self.at(TokenKind::Lt) && !self.trivia_before(0) {
                self.parse_generic_argument_clause();
            }
        }

        m.complete(self, SyntaxKind::SimpleType)
    }

    /// Parse `<A, B>` after a type name.
    pub(crate) fn parse_generic_argument_clause(&mut self) {
        self.start_node(SyntaxKind::GenericArgumentClause);
        self.bump(); // <

        while !self.at(TokenKind::Gt) && !self.at_end() {
            self.start_node(SyntaxKind::GenericArgument);
            let parsed = self.parse_type().is_some();
            self.finish_node();
            if !parsed || !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::Gt, "expected '>' to close generic arguments");
        self.finish_node();
    }

    fn parse_collection_type(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump(); // [
        self.parse_type();

        let kind = if self.eat(TokenKind::Colon) {
            self.parse_type();
            SyntaxKind::DictionaryType
        } else {
            SyntaxKind::ArrayType
        };

        self.expect(TokenKind::RBracket, "expected ']' to close collection type");
        m.complete(self, kind)
    }

    fn parse_tuple_type(&mut self) -> CompletedMarker {
        let m = self.start();
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::TupleTypeElement);
            if self.current().is_argument_label() && self.peek_kind_n(1) == TokenKind::Colon {
                self.bump();
                self.bump();
            } else if self.current().is_argument_label()
                && self.peek_kind_n(1).is_argument_label()
                && self.peek_kind_n(2) == TokenKind::Colon
            {
                self.bump();
                self.bump();
                self.bump();
            }
            let parsed = self.parse_type().is_some();
            self.eat(TokenKind::Ellipsis);
            self.finish_node();

            if !parsed || !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close tuple type");
        m.complete(self, SyntaxKind::TupleType)
    }
}
