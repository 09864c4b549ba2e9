//! Generic clauses, where clauses and inheritance.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

/// Layout constraint names accepted after `:` in a where clause.
const LAYOUT_CONSTRAINTS: &[&str] = &[
    "_Trivial",
    "_TrivialAtMost",
    "_TrivialStride",
    "_UnknownLayout",
    "_RefCountedObject",
    "_NativeRefCountedObject",
    "_Class",
    "_NativeClass",
    "_BridgeObject",
];

impl Parser<'_, '_> {
    /// Parse `<T, U: Bound>`.
    pub(crate) fn parse_generic_parameter_clause(&mut self) {
        self.start_node(SyntaxKind::GenericParameterClause);
        self.bump(); // <

        while !self.at(TokenKind::Gt) && !self.at_end() {
            self.start_node(SyntaxKind::GenericParameter);
            self.parse_attributes();
            if self.at_contextual("each") && self.peek_kind_n(1) == TokenKind::Ident {
                self.bump();
            }
            self.parse_name();
            if self.eat(TokenKind::Colon) {
                self.parse_type();
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        self.expect(TokenKind::Gt, "expected '>' to close generic parameters");
        self.finish_node();
    }

    /// Parse `<Element, Failure>` after a protocol name.
    pub(crate) fn parse_primary_associated_type_clause(&mut self) {
        self.start_node(SyntaxKind::PrimaryAssociatedTypeClause);
        self.bump(); // <

        while !self.at(TokenKind::Gt) && !self.at_end() {
            let before = self.position();
            self.parse_name();
            if self.position() == before || !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::Gt, "expected '>' to close primary associated types");
        self.finish_node();
    }

    /// Parse `where A: B, C == D`.
    pub(crate) fn parse_generic_where_clause(&mut self) {
        self.start_node(SyntaxKind::GenericWhereClause);
        self.bump(); // where

        loop {
            self.parse_generic_requirement();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.finish_node();
    }

    fn parse_generic_requirement(&mut self) {
        let m = self.start();
        if self.parse_type().is_none() {
            m.abandon(self);
            return;
        }

        if self.at(TokenKind::Colon) {
            self.bump();
            if self.at(TokenKind::Ident) && LAYOUT_CONSTRAINTS.contains(&self.current_text()) {
                self.bump();
                if self.at(TokenKind::LParen) {
                    self.bump_balanced();
                }
                m.complete(self, SyntaxKind::LayoutRequirement);
            } else {
                self.parse_type();
                m.complete(self, SyntaxKind::ConformanceRequirement);
            }
        } else if self.at(TokenKind::Operator) && self.current_text() == "==" {
            self.bump();
            self.parse_type();
            m.complete(self, SyntaxKind::SameTypeRequirement);
        } else {
            self.error("expected ':' or '==' in generic requirement");
            m.abandon(self);
        }
    }

    /// Parse `: A, B`.
    pub(crate) fn parse_inheritance_clause(&mut self) {
        self.start_node(SyntaxKind::InheritanceClause);
        self.bump(); // :

        loop {
            self.start_node(SyntaxKind::InheritedType);
            if self.at(TokenKind::Operator) && self.current_text() == "~" {
                self.bump();
            }
            if self.at(TokenKind::KwClass) {
                self.bump();
            } else {
                self.parse_type();
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.finish_node();
    }
}
