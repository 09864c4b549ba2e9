//! Attribute and modifier parsing.
//!
//! Handles:
//! - `@name`, `@Module.Name`, `@name(arguments)`
//! - Declaration modifiers, including `private(set)` style details
//! - `class` used as a modifier (`class func`, `class var`)

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::is_name_like;

/// Contextual keywords accepted as declaration modifiers.
pub(crate) const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "fileprivate",
    "internal",
    "open",
    "package",
    "final",
    "override",
    "required",
    "convenience",
    "dynamic",
    "lazy",
    "optional",
    "mutating",
    "nonmutating",
    "weak",
    "unowned",
    "indirect",
    "prefix",
    "postfix",
    "infix",
    "nonisolated",
    "distributed",
    "consuming",
    "borrowing",
    "__consuming",
];

impl Parser<'_, '_> {
    /// Parse an optional attribute list.
    pub(crate) fn parse_attributes(&mut self) {
        if !self.at(TokenKind::At) {
            return;
        }

        self.start_node(SyntaxKind::AttributeList);
        while self.at(TokenKind::At) {
            self.parse_attribute();
        }
        self.finish_node();
    }

    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::Attribute);
        self.bump(); // @

        if is_name_like(self.current()) {
            self.bump();
            while self.at(TokenKind::Dot) && is_name_like(self.peek_kind_n(1)) {
                self.bump();
                self.bump();
            }
        } else {
            self.error("expected attribute name");
        }

        if self.at(TokenKind::Lt) && !self.trivia_before(0) {
            self.parse_generic_argument_clause();
        }
        if self.at(TokenKind::LParen) && !self.trivia_before(0) {
            self.parse_attribute_arguments();
        }

        self.finish_node();
    }

    fn parse_attribute_arguments(&mut self) {
        self.start_node(SyntaxKind::AttributeArguments);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::AttributeArgument);
            if is_name_like(self.current()) && self.peek_kind_n(1) == TokenKind::Colon {
                self.bump();
                self.bump();
            }
            while !matches!(
                self.current(),
                TokenKind::Comma | TokenKind::RParen | TokenKind::Eof
            ) {
                self.bump_balanced();
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close attribute arguments");
        self.finish_node();
    }

    /// Parse an optional modifier list.
    pub(crate) fn parse_modifiers(&mut self) {
        if !self.at_modifier(0) {
            return;
        }

        self.start_node(SyntaxKind::ModifierList);
        while self.at_modifier(0) {
            self.start_node(SyntaxKind::Modifier);
            self.bump();
            if self.at_modifier_detail(0) {
                self.start_node(SyntaxKind::ModifierDetail);
                self.bump(); // (
                self.bump(); // set / unsafe
                self.bump(); // )
                self.finish_node();
            }
            self.finish_node();
        }
        self.finish_node();
    }

    /// Returns `true` if the nth token ahead is a declaration modifier.
    pub(crate) fn at_modifier(&self, n: usize) -> bool {
        match self.peek_kind_n(n) {
            TokenKind::KwStatic => true,
            TokenKind::KwClass => self.class_is_modifier(n),
            TokenKind::Ident => MODIFIERS.contains(&self.peek_text_n(n)),
            _ => false,
        }
    }

    /// Returns `true` if a `(detail)` group follows the modifier ending before `n`.
    pub(crate) fn at_modifier_detail(&self, n: usize) -> bool {
        self.peek_kind_n(n) == TokenKind::LParen
            && self.peek_kind_n(n + 1) == TokenKind::Ident
            && self.peek_kind_n(n + 2) == TokenKind::RParen
    }

    /// `class` is a modifier when another declaration keyword follows it.
    fn class_is_modifier(&self, n: usize) -> bool {
        let next = self.peek_kind_n(n + 1);
        if matches!(
            next,
            TokenKind::KwFunc
                | TokenKind::KwVar
                | TokenKind::KwLet
                | TokenKind::KwSubscript
                | TokenKind::KwTypealias
                | TokenKind::KwStatic
        ) {
            return true;
        }
        next == TokenKind::Ident
            && MODIFIERS.contains(&self.peek_text_n(n + 1))
            && (self.peek_kind_n(n + 2).is_decl_keyword()
                || (self.peek_kind_n(n + 2) == TokenKind::Ident
                    && MODIFIERS.contains(&self.peek_text_n(n + 2))))
    }

    /// Returns the index just past the attribute starting at the nth token.
    pub(crate) fn skip_attribute(&self, mut n: usize) -> usize {
        n += 1; // @
        if is_name_like(self.peek_kind_n(n)) {
            n += 1;
            while self.peek_kind_n(n) == TokenKind::Dot && is_name_like(self.peek_kind_n(n + 1)) {
                n += 2;
            }
        }
        if self.peek_kind_n(n) == TokenKind::Lt && !self.trivia_before(n) {
            n = self.skip_angle_brackets(n);
        }
        if self.peek_kind_n(n) == TokenKind::LParen && !self.trivia_before(n) {
            n = self.skip_balanced(n);
        }
        n
    }

    /// Returns the index just past the bracketed group opening at the nth token.
    pub(crate) fn skip_balanced(&self, mut n: usize) -> usize {
        let mut depth = 0usize;
        loop {
            match self.peek_kind_n(n) {
                TokenKind::Eof => return n,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            n += 1;
            if depth == 0 {
                return n;
            }
        }
    }

    fn skip_angle_brackets(&self, mut n: usize) -> usize {
        let mut depth = 0usize;
        loop {
            match self.peek_kind_n(n) {
                TokenKind::Eof | TokenKind::LBrace | TokenKind::RBrace => return n,
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => depth = depth.saturating_sub(1),
                _ => {}
            }
            n += 1;
            if depth == 0 {
                return n;
            }
        }
    }
}
