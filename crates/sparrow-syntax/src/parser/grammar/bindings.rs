//! Variable declarations.
//!
//! `var a = 1, b: Int { didSet {} }` becomes one `VariableDecl` holding a
//! `PatternBindingList`; each binding carries its own pattern, annotation,
//! initializer and accessors.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::ExprContext;

impl Parser<'_, '_> {
    pub(crate) fn parse_variable_rest(&mut self) {
        self.bump(); // let / var

        self.start_node(SyntaxKind::PatternBindingList);
        loop {
            self.parse_pattern_binding();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_pattern_binding(&mut self) {
        self.start_node(SyntaxKind::PatternBinding);

        self.parse_binding_pattern();
        if self.at(TokenKind::Colon) {
            self.parse_type_annotation();
        }

        let has_initializer = self.at(TokenKind::Eq);
        if has_initializer {
            self.parse_initializer_clause(ExprContext::INITIALIZER);
        }
        if self.at(TokenKind::LBrace) && (!has_initializer || self.at_observer_block()) {
            self.parse_accessor_block();
        }

        self.finish_node();
    }

    /// Parse the pattern of a variable binding: a name, `_`, or a tuple of those.
    pub(crate) fn parse_binding_pattern(&mut self) {
        match self.current() {
            TokenKind::Ident => {
                self.start_node(SyntaxKind::IdentifierPattern);
                self.bump();
                self.finish_node();
            }
            TokenKind::Underscore => {
                self.start_node(SyntaxKind::WildcardPattern);
                self.bump();
                self.finish_node();
            }
            TokenKind::LParen => {
                self.start_node(SyntaxKind::TuplePattern);
                self.bump(); // (
                while !self.at(TokenKind::RParen) && !self.at_end() {
                    self.start_node(SyntaxKind::TuplePatternElement);
                    self.parse_binding_pattern();
                    self.finish_node();
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "expected ')' to close tuple pattern");
                self.finish_node();
            }
            _ => self.error("expected variable name"),
        }
    }

    /// Parse `: Type`.
    pub(crate) fn parse_type_annotation(&mut self) {
        self.start_node(SyntaxKind::TypeAnnotation);
        self.bump(); // :
        self.parse_type();
        self.finish_node();
    }

    /// Parse `= expression`.
    pub(crate) fn parse_initializer_clause(&mut self, ctx: ExprContext) {
        self.start_node(SyntaxKind::InitializerClause);
        self.bump(); // =
        self.parse_expr(ctx);
        self.finish_node();
    }

    /// Returns `true` at a `{` that opens `willSet`/`didSet` observers.
    pub(crate) fn at_observer_block(&self) -> bool {
        if !self.at(TokenKind::LBrace) {
            return false;
        }
        let mut n = 1;
        while self.peek_kind_n(n) == TokenKind::At {
            n = self.skip_attribute(n);
        }
        self.nth_contextual(n, "willSet") || self.nth_contextual(n, "didSet")
    }
}
