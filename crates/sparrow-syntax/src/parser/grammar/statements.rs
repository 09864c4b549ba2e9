//! Statements.
//!
//! Handles:
//! - `if`, `guard`, `while`, `repeat`, `for`-`in`, `do`/`catch`, `defer`
//! - `return`, `throw`, `break`, `continue`, `fallthrough`
//! - Labeled loops
//! - `switch` with its cases and case items

use crate::lexer::TokenKind;
use crate::parser::Marker;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::{ExprContext, ItemContext};

impl Parser<'_, '_> {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self) {
        let kind = self.current();

        if kind == TokenKind::KwCase {
            self.error("enum 'case' is only allowed inside an enum");
            self.start_node(SyntaxKind::Unexpected);
            self.parse_declaration(SyntaxKind::EnumCaseDecl);
            self.finish_node();
            return;
        }
        if kind.is_closing_delimiter() {
            self.error_and_bump("unexpected closing delimiter");
            return;
        }

        let m = self.start();
        if self.at_statement_label() {
            self.bump(); // label
            self.bump(); // :
        }

        match self.current() {
            TokenKind::KwIf => self.parse_if_rest(m),
            TokenKind::KwGuard => self.parse_guard_stmt(m),
            TokenKind::KwWhile => self.parse_while_stmt(m),
            TokenKind::KwRepeat => self.parse_repeat_stmt(m),
            TokenKind::KwFor => self.parse_for_stmt(m),
            TokenKind::KwDo => self.parse_do_stmt(m),
            TokenKind::KwSwitch => self.parse_switch_rest(m),
            TokenKind::KwDefer => {
                self.bump();
                self.parse_code_block();
                m.complete(self, SyntaxKind::DeferStmt);
            }
            TokenKind::KwReturn => {
                self.bump();
                if !self.at_statement_end() {
                    self.parse_expr(ExprContext::STATEMENT);
                }
                m.complete(self, SyntaxKind::ReturnStmt);
            }
            TokenKind::KwThrow => {
                self.bump();
                self.parse_expr(ExprContext::STATEMENT);
                m.complete(self, SyntaxKind::ThrowStmt);
            }
            TokenKind::KwBreak | TokenKind::KwContinue => {
                let kind = if self.at(TokenKind::KwBreak) {
                    SyntaxKind::BreakStmt
                } else {
                    SyntaxKind::ContinueStmt
                };
                self.bump();
                if self.at(TokenKind::Ident) && !self.newline_before(0) {
                    self.bump();
                }
                m.complete(self, kind);
            }
            TokenKind::KwFallthrough => {
                self.bump();
                m.complete(self, SyntaxKind::FallthroughStmt);
            }
            _ if self.at_expr_start(ExprContext::STATEMENT) => {
                self.parse_expr(ExprContext::STATEMENT);
                m.complete(self, SyntaxKind::ExprStmt);
            }
            _ => {
                m.abandon(self);
                self.error_and_bump("expected statement");
            }
        }
    }

    fn at_statement_label(&self) -> bool {
        self.at(TokenKind::Ident)
            && self.peek_kind_n(1) == TokenKind::Colon
            && matches!(
                self.peek_kind_n(2),
                TokenKind::KwFor
                    | TokenKind::KwWhile
                    | TokenKind::KwRepeat
                    | TokenKind::KwDo
                    | TokenKind::KwIf
                    | TokenKind::KwSwitch
            )
    }

    fn at_statement_end(&self) -> bool {
        self.newline_before(0)
            || matches!(
                self.current(),
                TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof
            )
    }

    /// Parse `if conditions { } else ...`.
    pub(crate) fn parse_if_stmt(&mut self) {
        let m = self.start();
        self.parse_if_rest(m);
    }

    fn parse_if_rest(&mut self, m: Marker) {
        self.bump(); // if
        self.parse_condition_list();
        self.parse_code_block();

        if self.eat(TokenKind::KwElse) {
            if self.at(TokenKind::KwIf) {
                self.parse_if_stmt();
            } else {
                self.parse_code_block();
            }
        }
        m.complete(self, SyntaxKind::IfStmt);
    }

    fn parse_guard_stmt(&mut self, m: Marker) {
        self.bump(); // guard
        self.parse_condition_list();
        self.expect(TokenKind::KwElse, "expected 'else' after guard condition");
        self.parse_code_block();
        m.complete(self, SyntaxKind::GuardStmt);
    }

    fn parse_while_stmt(&mut self, m: Marker) {
        self.bump(); // while
        self.parse_condition_list();
        self.parse_code_block();
        m.complete(self, SyntaxKind::WhileStmt);
    }

    fn parse_repeat_stmt(&mut self, m: Marker) {
        self.bump(); // repeat
        self.parse_code_block();
        if self.expect(TokenKind::KwWhile, "expected 'while' after repeat body") {
            self.parse_expr(ExprContext::STATEMENT);
        }
        m.complete(self, SyntaxKind::RepeatStmt);
    }

    fn parse_for_stmt(&mut self, m: Marker) {
        self.bump(); // for
        self.eat(TokenKind::KwTry);
        if self.at_contextual("await") {
            self.bump();
        }

        if self.eat(TokenKind::KwCase) {
            self.parse_pattern(false);
        } else {
            self.parse_pattern(true);
        }
        if self.at(TokenKind::Colon) {
            self.parse_type_annotation();
        }

        if self.expect(TokenKind::KwIn, "expected 'in' after for-in pattern") {
            self.parse_expr(ExprContext::CONDITION);
        }
        if self.at(TokenKind::KwWhere) {
            self.parse_where_clause();
        }
        self.parse_code_block();
        m.complete(self, SyntaxKind::ForStmt);
    }

    fn parse_do_stmt(&mut self, m: Marker) {
        self.bump(); // do
        if self.at_effect_specifier() {
            self.parse_effect_specifiers();
        }
        self.parse_code_block();

        while self.at(TokenKind::KwCatch) {
            self.start_node(SyntaxKind::CatchClause);
            self.bump(); // catch
            if !self.at(TokenKind::LBrace) {
                self.parse_case_items();
            }
            self.parse_code_block();
            self.finish_node();
        }
        m.complete(self, SyntaxKind::DoStmt);
    }

    /// Parse comma-separated conditions of an `if`, `guard` or `while`.
    fn parse_condition_list(&mut self) {
        loop {
            self.start_node(SyntaxKind::Condition);
            match self.current() {
                TokenKind::KwLet | TokenKind::KwVar => {
                    self.parse_pattern(false);
                    if self.at(TokenKind::Colon) {
                        self.parse_type_annotation();
                    }
                    if self.at(TokenKind::Eq) {
                        self.parse_initializer_clause(ExprContext::CONDITION);
                    }
                }
                TokenKind::KwCase => {
                    self.bump(); // case
                    self.parse_pattern(false);
                    if self.at(TokenKind::Colon) {
                        self.parse_type_annotation();
                    }
                    if self.at(TokenKind::Eq) {
                        self.parse_initializer_clause(ExprContext::CONDITION);
                    } else {
                        self.error("expected '=' in case condition");
                    }
                }
                _ => {
                    self.parse_expr(ExprContext::CONDITION);
                }
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    /// Parse `where condition`.
    fn parse_where_clause(&mut self) {
        self.start_node(SyntaxKind::WhereClause);
        self.bump(); // where
        self.parse_expr(ExprContext::CONDITION);
        self.finish_node();
    }

    /// Parse `pattern where condition, ...` of a case label or catch clause.
    fn parse_case_items(&mut self) {
        loop {
            self.start_node(SyntaxKind::CaseItem);
            self.parse_pattern(false);
            if self.at(TokenKind::KwWhere) {
                self.parse_where_clause();
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    /// Parse `switch subject { cases }`.
    pub(crate) fn parse_switch_expr(&mut self) {
        let m = self.start();
        self.parse_switch_rest(m);
    }

    fn parse_switch_rest(&mut self, m: Marker) {
        self.bump(); // switch
        self.parse_expr(ExprContext::CONDITION);

        if self.expect(TokenKind::LBrace, "expected '{' after switch subject") {
            self.parse_item_list(ItemContext::SwitchCases);
            self.expect(TokenKind::RBrace, "expected '}' to close switch");
        }
        m.complete(self, SyntaxKind::SwitchExpr);
    }

    /// Parse one `case ...:` or `default:` with its statements.
    pub(crate) fn parse_switch_case(&mut self) {
        self.start_node(SyntaxKind::SwitchCase);
        self.parse_attributes();

        if self.at(TokenKind::KwCase) {
            self.start_node(SyntaxKind::SwitchCaseLabel);
            self.bump(); // case
            self.parse_case_items();
            self.expect(TokenKind::Colon, "expected ':' after case items");
            self.finish_node();
        } else if self.at(TokenKind::KwDefault) {
            self.start_node(SyntaxKind::SwitchDefaultLabel);
            self.bump(); // default
            self.expect(TokenKind::Colon, "expected ':' after 'default'");
            self.finish_node();
        } else {
            self.error("expected 'case' or 'default'");
        }

        self.parse_item_list(ItemContext::CaseBody);
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax::SyntaxKind;

    fn count(source: &str, kind: SyntaxKind) -> usize {
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        parse
            .syntax()
            .descendants()
            .filter(|node| node.kind() == kind)
            .count()
    }

    #[test]
    fn test_if_else_chain() {
        let source = "if a { } else if let b = c, b > 1 { } else { }";
        assert_eq!(count(source, SyntaxKind::IfStmt), 2);
        assert_eq!(count(source, SyntaxKind::Condition), 3);
    }

    #[test]
    fn test_guard_with_optional_binding_shorthand() {
        let source = "func f(x: Int?) {\n    guard let x else { return }\n    print(x)\n}";
        assert_eq!(count(source, SyntaxKind::GuardStmt), 1);
        assert_eq!(count(source, SyntaxKind::ReturnStmt), 1);
        assert_eq!(count(source, SyntaxKind::ExprStmt), 1);
    }

    #[test]
    fn test_loops() {
        let source = "outer: for (i, x) in xs.enumerated() where i > 0 {\n    while x > 0 { continue outer }\n}\nrepeat { } while false";
        assert_eq!(count(source, SyntaxKind::ForStmt), 1);
        assert_eq!(count(source, SyntaxKind::WhereClause), 1);
        assert_eq!(count(source, SyntaxKind::WhileStmt), 1);
        assert_eq!(count(source, SyntaxKind::ContinueStmt), 1);
        assert_eq!(count(source, SyntaxKind::RepeatStmt), 1);
    }

    #[test]
    fn test_do_catch() {
        let source = "do {\n    try run()\n} catch let error as MyError where error.fatal {\n} catch {\n}";
        assert_eq!(count(source, SyntaxKind::DoStmt), 1);
        assert_eq!(count(source, SyntaxKind::CatchClause), 2);
        assert_eq!(count(source, SyntaxKind::AsPattern), 1);
    }

    #[test]
    fn test_switch_cases() {
        let source = "switch x {\ncase .a, .b where y:\n    break\n@unknown default:\n    fallthrough\n}";
        assert_eq!(count(source, SyntaxKind::SwitchCase), 2);
        assert_eq!(count(source, SyntaxKind::CaseItem), 2);
        assert_eq!(count(source, SyntaxKind::SwitchDefaultLabel), 1);
        assert_eq!(count(source, SyntaxKind::FallthroughStmt), 1);
    }

    #[test]
    fn test_return_without_value() {
        let source = "func f() {\n    return\n    foo()\n}";
        assert_eq!(count(source, SyntaxKind::ReturnStmt), 1);
        assert_eq!(count(source, SyntaxKind::ExprStmt), 1);
    }

    #[test]
    fn test_case_outside_enum_is_reported() {
        let parse = parse("func f() { case a }");
        assert!(!parse.ok());
        assert!(parse
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::EnumCaseDecl));
    }
}
