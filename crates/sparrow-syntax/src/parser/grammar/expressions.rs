//! Expressions.
//!
//! Expressions are kept as balanced token runs (`Expr`) with only closures,
//! `if` and `switch` given structure. The hard part is deciding where a run
//! ends: at a line break in statement position, at `{` in a condition, or at
//! the token that closes the enclosing construct.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::ItemContext;

/// Upper bound on tokens scanned when looking for a closure's `in`.
const CLOSURE_SIGNATURE_LOOKAHEAD: usize = 128;

/// Where an expression appears; decides which tokens end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExprContext {
    /// A line break ends the expression unless the next line continues it.
    newline_terminated: bool,
    /// A `{` at bracket depth zero ends the expression.
    stop_at_brace: bool,
    /// A `{` opening `willSet`/`didSet` ends the expression.
    stop_at_observer: bool,
}

impl ExprContext {
    /// Expression statements, `return`, `throw`.
    pub(crate) const STATEMENT: Self = Self {
        newline_terminated: true,
        stop_at_brace: false,
        stop_at_observer: false,
    };

    /// `if`/`guard`/`while` conditions, `for` sequences, `switch` subjects.
    pub(crate) const CONDITION: Self = Self {
        newline_terminated: false,
        stop_at_brace: true,
        stop_at_observer: false,
    };

    /// The value after `=` in a declaration.
    pub(crate) const INITIALIZER: Self = Self {
        newline_terminated: true,
        stop_at_brace: false,
        stop_at_observer: true,
    };
}

impl Parser<'_, '_> {
    /// Parse an expression. Returns `false` (after recording an error) when
    /// the current token cannot start one; nothing is consumed in that case.
    pub(crate) fn parse_expr(&mut self, ctx: ExprContext) -> bool {
        if !self.at_expr_start(ctx) {
            self.error("expected expression");
            return false;
        }

        let m = self.start();
        let mut depth = 0usize;
        let mut ternaries = 0usize;
        let mut expects_operand = true;
        let mut prev = TokenKind::Eof;
        let mut first = true;

        loop {
            let kind = self.current();
            if depth == 0 && !first && self.at_expr_end(ctx, ternaries, expects_operand, prev) {
                break;
            }

            match kind {
                TokenKind::Eof | TokenKind::RBrace => break,
                _ if kind.is_if_config_directive() => break,
                TokenKind::LParen | TokenKind::LBracket => {
                    depth += 1;
                    self.bump();
                    expects_operand = true;
                }
                TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                    expects_operand = false;
                }
                TokenKind::LBrace => {
                    if depth == 0
                        && !first
                        && (ctx.stop_at_brace || (ctx.stop_at_observer && self.at_observer_block()))
                    {
                        break;
                    }
                    self.parse_closure_expr();
                    self.parse_trailing_closures();
                    expects_operand = false;
                }
                TokenKind::KwIf if expects_operand && prev != TokenKind::Dot => {
                    self.parse_if_stmt();
                    expects_operand = false;
                }
                TokenKind::KwSwitch if expects_operand && prev != TokenKind::Dot => {
                    self.parse_switch_expr();
                    expects_operand = false;
                }
                TokenKind::Question if self.trivia_before(0) && self.trivia_before(1) => {
                    ternaries += 1;
                    self.bump();
                    expects_operand = true;
                }
                TokenKind::Colon if depth == 0 => {
                    ternaries = ternaries.saturating_sub(1);
                    self.bump();
                    expects_operand = true;
                }
                _ => {
                    let spaced = self.trivia_before(0);
                    let is_await = self.at_contextual("await");
                    self.bump();
                    expects_operand = match kind {
                        TokenKind::Dot
                        | TokenKind::KwAs
                        | TokenKind::KwIs
                        | TokenKind::KwTry
                        | TokenKind::Eq
                        | TokenKind::Arrow
                        | TokenKind::Amp
                        | TokenKind::Lt
                        | TokenKind::Ellipsis
                        | TokenKind::Operator
                        | TokenKind::Comma
                        | TokenKind::Colon => true,
                        TokenKind::Question | TokenKind::Exclamation | TokenKind::Gt => spaced,
                        TokenKind::Ident => is_await,
                        _ => false,
                    };
                }
            }

            prev = kind;
            first = false;
        }

        if depth > 0 {
            self.error("expected closing bracket in expression");
        }
        m.complete(self, SyntaxKind::Expr);
        true
    }

    /// Returns `true` if the current token can begin an expression in `ctx`.
    pub(crate) fn at_expr_start(&self, ctx: ExprContext) -> bool {
        let kind = self.current();
        match kind {
            TokenKind::Eof
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::KwElse
            | TokenKind::KwCatch
            | TokenKind::KwIn
            | TokenKind::KwWhere
            | TokenKind::KwCase
            | TokenKind::KwDefault
            | TokenKind::KwStatic => false,
            TokenKind::LBrace => !ctx.stop_at_brace,
            TokenKind::KwIf | TokenKind::KwSwitch => true,
            _ if kind.is_if_config_directive() => false,
            _ => !kind.is_decl_keyword() && !kind.is_statement_keyword(),
        }
    }

    /// Decides whether an expression at bracket depth zero ends before the
    /// current token.
    fn at_expr_end(
        &self,
        ctx: ExprContext,
        ternaries: usize,
        expects_operand: bool,
        prev: TokenKind,
    ) -> bool {
        let kind = self.current();
        match kind {
            TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace => return true,
            TokenKind::Colon if ternaries == 0 => return true,
            _ => {}
        }

        if kind.is_keyword() && prev != TokenKind::Dot {
            let ends = match kind {
                TokenKind::KwElse
                | TokenKind::KwCatch
                | TokenKind::KwIn
                | TokenKind::KwWhere
                | TokenKind::KwCase
                | TokenKind::KwDefault
                | TokenKind::KwStatic => true,
                TokenKind::KwIf | TokenKind::KwSwitch => !expects_operand,
                _ => kind.is_decl_keyword() || kind.is_statement_keyword(),
            };
            if ends {
                return true;
            }
        }

        ctx.newline_terminated
            && self.newline_before(0)
            && !expects_operand
            && !self.continues_expression(ternaries)
    }

    /// Returns `true` if the token starting a new line continues the expression
    /// from the previous line.
    fn continues_expression(&self, ternaries: usize) -> bool {
        match self.current() {
            TokenKind::Dot | TokenKind::Question | TokenKind::KwAs | TokenKind::KwIs => true,
            TokenKind::Colon => ternaries > 0,
            TokenKind::Operator
            | TokenKind::Eq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Amp
            | TokenKind::Ellipsis
            | TokenKind::Arrow => self.trivia_before(1),
            _ => false,
        }
    }

    /// Parse `{ signature in statements }`.
    pub(crate) fn parse_closure_expr(&mut self) {
        self.start_node(SyntaxKind::ClosureExpr);
        self.bump(); // {

        if self.at_closure_signature() {
            self.parse_closure_signature();
        }
        self.parse_item_list(ItemContext::Block);

        self.expect(TokenKind::RBrace, "expected '}' to close closure");
        self.finish_node();
    }

    /// Parse `label: { ... }` closures following a trailing closure.
    fn parse_trailing_closures(&mut self) {
        while matches!(self.current(), TokenKind::Ident | TokenKind::Underscore)
            && !self.newline_before(0)
            && self.peek_kind_n(1) == TokenKind::Colon
            && self.peek_kind_n(2) == TokenKind::LBrace
        {
            self.bump(); // label
            self.bump(); // :
            self.parse_closure_expr();
        }
    }

    /// Looks ahead from just inside `{` for a closure signature ending in `in`.
    fn at_closure_signature(&self) -> bool {
        let mut n = 0;
        while self.peek_kind_n(n) == TokenKind::At {
            n = self.skip_attribute(n);
        }
        if self.peek_kind_n(n) == TokenKind::LBracket {
            n = self.skip_balanced(n);
        }

        while n < CLOSURE_SIGNATURE_LOOKAHEAD {
            match self.peek_kind_n(n) {
                TokenKind::KwIn => return true,
                TokenKind::LParen | TokenKind::LBracket => n = self.skip_balanced(n),
                TokenKind::At => n = self.skip_attribute(n),
                TokenKind::Ident
                | TokenKind::Underscore
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Arrow
                | TokenKind::Dot
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Question
                | TokenKind::Exclamation
                | TokenKind::Amp
                | TokenKind::Ellipsis
                | TokenKind::KwThrows
                | TokenKind::KwRethrows
                | TokenKind::KwSelf
                | TokenKind::KwCapitalSelf
                | TokenKind::KwInout => n += 1,
                _ => return false,
            }
        }
        false
    }

    fn parse_closure_signature(&mut self) {
        self.start_node(SyntaxKind::ClosureSignature);
        self.parse_attributes();

        // Capture list.
        if self.at(TokenKind::LBracket) {
            self.bump_balanced();
        }

        if self.at(TokenKind::LParen) {
            self.parse_parameter_clause();
        } else {
            while matches!(self.current(), TokenKind::Ident | TokenKind::Underscore) {
                self.bump();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        if self.at_effect_specifier() {
            self.parse_effect_specifiers();
        }
        if self.at(TokenKind::Arrow) {
            self.parse_return_clause();
        }

        self.expect(TokenKind::KwIn, "expected 'in' after closure signature");
        self.finish_node();
    }
}
