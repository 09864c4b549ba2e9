//! Function-like declarations.
//!
//! Handles:
//! - `func` (named and operator functions), `init`, `deinit`, `subscript`
//! - Parameter clauses, effect specifiers and return clauses
//! - Accessor blocks (`get`/`set`/`willSet`/`didSet`/`_modify`/`_read`/`init`)
//! - Code blocks

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::{ExprContext, ItemContext};

const ACCESSOR_NAMES: &[&str] = &[
    "get",
    "set",
    "willSet",
    "didSet",
    "_modify",
    "_read",
    "modify",
    "read",
    "unsafeAddress",
    "unsafeMutableAddress",
];

const ACCESSOR_MODIFIERS: &[&str] = &["mutating", "nonmutating", "__consuming", "consuming", "borrowing"];

impl Parser<'_, '_> {
    pub(crate) fn parse_function_rest(&mut self) {
        self.bump(); // func
        self.parse_function_name();

        if self.at(TokenKind::Lt) {
            self.parse_generic_parameter_clause();
        }
        self.parse_function_signature();
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_code_block();
        }
    }

    fn parse_function_name(&mut self) {
        let kind = self.current();
        if kind == TokenKind::Ident {
            self.parse_name();
            return;
        }
        if !(kind.is_operator_like() || kind == TokenKind::Dot) {
            self.error("expected function name");
            return;
        }

        self.start_node(SyntaxKind::Name);
        self.bump();
        while !self.trivia_before(0)
            && (self.current().is_operator_like() || self.at(TokenKind::Dot))
            && !self.at(TokenKind::Lt)
        {
            self.bump();
        }
        self.finish_node();
    }

    pub(crate) fn parse_initializer_rest(&mut self) {
        self.bump(); // init
        if (self.at(TokenKind::Question) || self.at(TokenKind::Exclamation))
            && !self.trivia_before(0)
        {
            self.bump();
        }

        if self.at(TokenKind::Lt) {
            self.parse_generic_parameter_clause();
        }
        self.parse_function_signature();
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_code_block();
        }
    }

    pub(crate) fn parse_deinitializer_rest(&mut self) {
        self.bump(); // deinit
        if self.at_effect_specifier() {
            self.parse_effect_specifiers();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_code_block();
        }
    }

    pub(crate) fn parse_subscript_rest(&mut self) {
        self.bump(); // subscript

        if self.at(TokenKind::Lt) {
            self.parse_generic_parameter_clause();
        }
        self.parse_function_signature();
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_accessor_block();
        }
    }

    /// Parse `(parameters) effects -> ReturnType`.
    pub(crate) fn parse_function_signature(&mut self) {
        self.start_node(SyntaxKind::FunctionSignature);

        if self.at(TokenKind::LParen) {
            self.parse_parameter_clause();
        } else {
            self.error("expected '(' to start parameter list");
        }
        if self.at_effect_specifier() {
            self.parse_effect_specifiers();
        }
        if self.at(TokenKind::Arrow) {
            self.parse_return_clause();
        }

        self.finish_node();
    }

    /// Parse `(parameter, ...)`.
    pub(crate) fn parse_parameter_clause(&mut self) {
        self.start_node(SyntaxKind::ParameterClause);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            let before = self.position();
            self.parse_parameter();
            if self.position() == before {
                break;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close parameter list");
        self.finish_node();
    }

    fn parse_parameter(&mut self) {
        self.start_node(SyntaxKind::Parameter);
        self.parse_attributes();

        let first = self.current();
        if first.is_argument_label() {
            let second = self.peek_kind_n(1);
            if second == TokenKind::Colon {
                self.bump();
            } else if second.is_argument_label() && self.peek_kind_n(2) == TokenKind::Colon {
                self.bump();
                self.bump();
            } else if matches!(second, TokenKind::Comma | TokenKind::RParen) {
                // Untyped closure parameter.
                self.bump();
            }
        }

        if self.eat(TokenKind::Colon) {
            self.parse_type();
        } else if !matches!(self.current(), TokenKind::Comma | TokenKind::RParen) {
            self.error("expected ':' and parameter type");
        }

        self.eat(TokenKind::Ellipsis);
        if self.at(TokenKind::Eq) {
            self.parse_initializer_clause(ExprContext::INITIALIZER);
        }

        self.finish_node();
    }

    /// Returns `true` at `async`, `reasync`, `throws` or `rethrows`.
    pub(crate) fn at_effect_specifier(&self) -> bool {
        matches!(self.current(), TokenKind::KwThrows | TokenKind::KwRethrows)
            || self.at_contextual("async")
            || self.at_contextual("reasync")
    }

    /// Parse `async throws(Error)`.
    pub(crate) fn parse_effect_specifiers(&mut self) {
        self.start_node(SyntaxKind::EffectSpecifiers);
        while self.at_effect_specifier() {
            let is_throws = matches!(self.current(), TokenKind::KwThrows | TokenKind::KwRethrows);
            self.bump();
            if is_throws && self.at(TokenKind::LParen) && !self.trivia_before(0) {
                self.bump(); // (
                self.parse_type();
                self.expect(TokenKind::RParen, "expected ')' after thrown type");
            }
        }
        self.finish_node();
    }

    /// Parse `-> Type`.
    pub(crate) fn parse_return_clause(&mut self) {
        self.start_node(SyntaxKind::ReturnClause);
        self.bump(); // ->
        self.parse_type();
        self.finish_node();
    }

    /// Parse `{ statements }`.
    pub(crate) fn parse_code_block(&mut self) {
        if !self.at(TokenKind::LBrace) {
            self.error("expected '{'");
            return;
        }

        self.start_node(SyntaxKind::CodeBlock);
        self.bump(); // {
        self.parse_item_list(ItemContext::Block);
        self.expect(TokenKind::RBrace, "expected '}' to close block");
        self.finish_node();
    }

    /// Parse `{ get set }`, observer blocks, or a computed getter body.
    pub(crate) fn parse_accessor_block(&mut self) {
        self.start_node(SyntaxKind::AccessorBlock);
        self.bump(); // {

        if self.at_accessor_start() {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if self.at_accessor_start() {
                    self.parse_accessor();
                } else if self.at(TokenKind::PoundIf) {
                    self.error_and_bump("conditional accessors are not supported");
                } else {
                    self.error_and_bump("expected accessor");
                }
            }
        } else {
            self.parse_item_list(ItemContext::Block);
        }

        self.expect(TokenKind::RBrace, "expected '}' to close accessor block");
        self.finish_node();
    }

    /// Returns `true` if the next tokens begin an accessor rather than a statement.
    pub(crate) fn at_accessor_start(&self) -> bool {
        let mut n = 0;
        while self.peek_kind_n(n) == TokenKind::At {
            n = self.skip_attribute(n);
        }
        while self.peek_kind_n(n) == TokenKind::Ident
            && ACCESSOR_MODIFIERS.contains(&self.peek_text_n(n))
        {
            n += 1;
        }

        let is_name = match self.peek_kind_n(n) {
            TokenKind::KwInit => true,
            TokenKind::Ident => ACCESSOR_NAMES.contains(&self.peek_text_n(n)),
            _ => false,
        };
        if !is_name {
            return false;
        }

        let takes_parameter = self.peek_text_n(n) != "get";
        match self.peek_kind_n(n + 1) {
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::KwThrows | TokenKind::Eof => true,
            TokenKind::LParen => takes_parameter,
            TokenKind::Ident => {
                let next = self.peek_text_n(n + 1);
                ACCESSOR_NAMES.contains(&next)
                    || ACCESSOR_MODIFIERS.contains(&next)
                    || next == "async"
            }
            TokenKind::At => true,
            _ => false,
        }
    }

    fn parse_accessor(&mut self) {
        self.start_node(SyntaxKind::Accessor);
        self.parse_attributes();
        self.parse_modifiers();

        self.bump(); // accessor name
        if self.at(TokenKind::LParen) {
            self.start_node(SyntaxKind::AccessorParameter);
            self.bump(); // (
            self.expect(TokenKind::Ident, "expected accessor parameter name");
            self.expect(TokenKind::RParen, "expected ')' after accessor parameter");
            self.finish_node();
        }
        if self.at_effect_specifier() {
            self.parse_effect_specifiers();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_code_block();
        }

        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax::SyntaxKind;

    fn count(source: &str, kind: SyntaxKind) -> usize {
        parse(source)
            .syntax()
            .descendants()
            .filter(|node| node.kind() == kind)
            .count()
    }

    #[test]
    fn test_operator_function_name() {
        let source = "static func <~> (lhs: Int, rhs: Int) -> Int { lhs }";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        let name = parse
            .syntax()
            .descendants()
            .find(|node| node.kind() == SyntaxKind::Name)
            .expect("name");
        assert_eq!(name.text().to_string(), "<~>");
    }

    #[test]
    fn test_protocol_accessor_requirements() {
        let source = "protocol P { var value: Int { get set } }";
        assert!(parse(source).ok());
        assert_eq!(count(source, SyntaxKind::Accessor), 2);
    }

    #[test]
    fn test_computed_property_body_is_not_accessor() {
        let source = "struct S { var doubled: Int { value * 2 } }";
        assert!(parse(source).ok());
        assert_eq!(count(source, SyntaxKind::Accessor), 0);
        assert_eq!(count(source, SyntaxKind::AccessorBlock), 1);
    }

    #[test]
    fn test_setter_parameter_and_effects() {
        let source = "struct S { var v: Int { get async throws { 1 } set(newV) { } } }";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(count(source, SyntaxKind::AccessorParameter), 1);
        assert_eq!(count(source, SyntaxKind::EffectSpecifiers), 1);
    }

    #[test]
    fn test_failable_initializer() {
        let source = "struct S { init?(raw: String) throws {} }";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(count(source, SyntaxKind::InitializerDecl), 1);
    }
}
