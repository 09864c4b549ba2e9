//! Item parsing for Swift.
//!
//! Handles:
//! - Item lists at top level, in member blocks, code blocks and `switch` bodies
//! - Declaration lookahead past attributes and modifiers
//! - Classes, structures, enumerations, actors, protocols and extensions
//! - Type aliases, associated types, imports, operators and precedence groups
//! - Enum cases and `#if` blocks

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;
use super::ExprContext;

/// Where an item list appears; decides what may start an item and what ends the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemContext {
    /// File scope: declarations and statements.
    TopLevel,
    /// Inside a type or extension body: declarations only.
    Member,
    /// Inside a code block or closure: declarations and statements.
    Block,
    /// Statements of one `case` in a `switch`.
    CaseBody,
    /// The cases of a `switch`.
    SwitchCases,
}

impl Parser<'_, '_> {
    /// Parse the whole file.
    pub(crate) fn parse_source_file(&mut self) {
        self.parse_item_list(ItemContext::TopLevel);
        while !self.at_end() {
            self.error_and_bump("unexpected token at top level");
            self.parse_item_list(ItemContext::TopLevel);
        }
    }

    /// Parse items until the end of the enclosing list.
    pub(crate) fn parse_item_list(&mut self, ctx: ItemContext) {
        while !self.at_end() && !self.at_item_list_end(ctx) {
            let before = self.position();
            self.parse_item(ctx);
            if self.position() == before {
                self.error_and_bump("unexpected token");
            }
        }
    }

    fn at_item_list_end(&self, ctx: ItemContext) -> bool {
        match self.current() {
            TokenKind::RBrace => true,
            TokenKind::PoundElseif | TokenKind::PoundElse | TokenKind::PoundEndif => {
                self.if_config_depth > 0
            }
            TokenKind::KwCase | TokenKind::KwDefault => ctx == ItemContext::CaseBody,
            TokenKind::At => ctx == ItemContext::CaseBody && self.nth_contextual(1, "unknown"),
            _ => false,
        }
    }

    fn parse_item(&mut self, ctx: ItemContext) {
        match self.current() {
            TokenKind::Semicolon => self.bump(),
            TokenKind::PoundIf => self.parse_if_config(ctx),
            TokenKind::PoundElseif | TokenKind::PoundElse | TokenKind::PoundEndif => {
                self.error_and_bump("unexpected conditional compilation directive");
            }
            _ if ctx == ItemContext::SwitchCases => {
                if self.at(TokenKind::KwCase) || self.at(TokenKind::KwDefault) || self.at(TokenKind::At) {
                    self.parse_switch_case();
                } else {
                    self.error_and_bump("expected 'case' or 'default' in switch");
                }
            }
            _ => {
                if let Some(kind) = self.declaration_start(ctx) {
                    self.parse_declaration(kind);
                } else if ctx == ItemContext::Member {
                    if self.current().is_closing_delimiter() {
                        self.error_and_bump("unexpected closing delimiter");
                        return;
                    }
                    self.error("expected declaration");
                    self.start_node(SyntaxKind::Unexpected);
                    self.parse_statement();
                    self.finish_node();
                } else {
                    self.parse_statement();
                }
            }
        }
    }

    /// Looks past attributes and modifiers for a declaration keyword.
    pub(crate) fn declaration_start(&self, ctx: ItemContext) -> Option<SyntaxKind> {
        let mut n = 0;
        while self.peek_kind_n(n) == TokenKind::At {
            n = self.skip_attribute(n);
        }
        while self.at_modifier(n) {
            n += if self.at_modifier_detail(n + 1) { 4 } else { 1 };
        }

        let kind = match self.peek_kind_n(n) {
            TokenKind::KwClass => SyntaxKind::ClassDecl,
            TokenKind::KwStruct => SyntaxKind::StructDecl,
            TokenKind::KwEnum => SyntaxKind::EnumDecl,
            TokenKind::KwProtocol => SyntaxKind::ProtocolDecl,
            TokenKind::KwExtension => SyntaxKind::ExtensionDecl,
            TokenKind::KwFunc => SyntaxKind::FunctionDecl,
            TokenKind::KwInit => SyntaxKind::InitializerDecl,
            TokenKind::KwDeinit => SyntaxKind::DeinitializerDecl,
            TokenKind::KwSubscript => SyntaxKind::SubscriptDecl,
            TokenKind::KwLet | TokenKind::KwVar => SyntaxKind::VariableDecl,
            TokenKind::KwTypealias => SyntaxKind::TypeAliasDecl,
            TokenKind::KwAssociatedtype => SyntaxKind::AssociatedTypeDecl,
            TokenKind::KwImport => SyntaxKind::ImportDecl,
            TokenKind::KwOperator => SyntaxKind::OperatorDecl,
            TokenKind::KwPrecedencegroup => SyntaxKind::PrecedenceGroupDecl,
            TokenKind::KwCase if ctx == ItemContext::Member => SyntaxKind::EnumCaseDecl,
            TokenKind::Ident
                if self.peek_text_n(n) == "actor"
                    && self.peek_kind_n(n + 1) == TokenKind::Ident =>
            {
                SyntaxKind::ActorDecl
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Parse a declaration whose kind was found by [`Parser::declaration_start`].
    pub(crate) fn parse_declaration(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.parse_attributes();
        self.parse_modifiers();

        match kind {
            SyntaxKind::ClassDecl
            | SyntaxKind::StructDecl
            | SyntaxKind::EnumDecl
            | SyntaxKind::ActorDecl
            | SyntaxKind::ProtocolDecl => self.parse_nominal_rest(kind),
            SyntaxKind::ExtensionDecl => self.parse_extension_rest(),
            SyntaxKind::FunctionDecl => self.parse_function_rest(),
            SyntaxKind::InitializerDecl => self.parse_initializer_rest(),
            SyntaxKind::DeinitializerDecl => self.parse_deinitializer_rest(),
            SyntaxKind::SubscriptDecl => self.parse_subscript_rest(),
            SyntaxKind::VariableDecl => self.parse_variable_rest(),
            SyntaxKind::TypeAliasDecl => self.parse_typealias_rest(),
            SyntaxKind::AssociatedTypeDecl => self.parse_associatedtype_rest(),
            SyntaxKind::ImportDecl => self.parse_import_rest(),
            SyntaxKind::OperatorDecl => self.parse_operator_rest(),
            SyntaxKind::PrecedenceGroupDecl => self.parse_precedence_group_rest(),
            SyntaxKind::EnumCaseDecl => self.parse_enum_case_rest(),
            _ => self.error("unsupported declaration"),
        }

        self.finish_node();
    }

    /// Parse a declared name.
    pub(crate) fn parse_name(&mut self) {
        if self.at(TokenKind::Ident) {
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected name");
        }
    }

    fn parse_nominal_rest(&mut self, kind: SyntaxKind) {
        self.bump(); // class / struct / enum / actor / protocol
        self.parse_name();

        if self.at(TokenKind::Lt) {
            if kind == SyntaxKind::ProtocolDecl {
                self.parse_primary_associated_type_clause();
            } else {
                self.parse_generic_parameter_clause();
            }
        }
        if self.at(TokenKind::Colon) {
            self.parse_inheritance_clause();
        }
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        self.parse_member_block();
    }

    fn parse_extension_rest(&mut self) {
        self.bump(); // extension
        self.parse_type();
        if self.at(TokenKind::Colon) {
            self.parse_inheritance_clause();
        }
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
        self.parse_member_block();
    }

    /// Parse `{ members }`.
    pub(crate) fn parse_member_block(&mut self) {
        if !self.at(TokenKind::LBrace) {
            self.error("expected '{' to start member block");
            return;
        }

        self.start_node(SyntaxKind::MemberBlock);
        self.bump(); // {
        self.parse_item_list(ItemContext::Member);
        self.expect(TokenKind::RBrace, "expected '}' to close member block");
        self.finish_node();
    }

    fn parse_typealias_rest(&mut self) {
        self.bump(); // typealias
        self.parse_name();
        if self.at(TokenKind::Lt) {
            self.parse_generic_parameter_clause();
        }
        if self.at(TokenKind::Eq) {
            self.parse_type_initializer_clause();
        } else {
            self.error("expected '=' in typealias");
        }
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
    }

    fn parse_associatedtype_rest(&mut self) {
        self.bump(); // associatedtype
        self.parse_name();
        if self.at(TokenKind::Colon) {
            self.parse_inheritance_clause();
        }
        if self.at(TokenKind::Eq) {
            self.parse_type_initializer_clause();
        }
        if self.at(TokenKind::KwWhere) {
            self.parse_generic_where_clause();
        }
    }

    fn parse_type_initializer_clause(&mut self) {
        self.start_node(SyntaxKind::TypeInitializerClause);
        self.bump(); // =
        self.parse_type();
        self.finish_node();
    }

    fn parse_import_rest(&mut self) {
        self.bump(); // import

        let kind_keyword = matches!(
            self.current(),
            TokenKind::KwStruct
                | TokenKind::KwClass
                | TokenKind::KwEnum
                | TokenKind::KwProtocol
                | TokenKind::KwTypealias
                | TokenKind::KwFunc
                | TokenKind::KwLet
                | TokenKind::KwVar
        ) || (self.at_contextual("actor") && self.peek_kind_n(1) == TokenKind::Ident);
        if kind_keyword {
            self.bump();
        }

        self.start_node(SyntaxKind::ImportPath);
        if self.at_import_component() {
            self.bump();
        } else {
            self.error("expected module name");
        }
        while self.at(TokenKind::Dot) {
            self.bump();
            if self.at_import_component() {
                self.bump();
            } else {
                self.error("expected name after '.'");
                break;
            }
        }
        self.finish_node();
    }

    fn at_import_component(&self) -> bool {
        let kind = self.current();
        kind == TokenKind::Ident || kind.is_operator_like()
    }

    fn parse_operator_rest(&mut self) {
        self.bump(); // operator

        let starts_name = {
            let kind = self.current();
            kind.is_operator_like() || kind == TokenKind::Ident || kind == TokenKind::Dot
        };
        if starts_name {
            self.start_node(SyntaxKind::Name);
            self.bump();
            while !self.trivia_before(0)
                && (self.current().is_operator_like() || self.at(TokenKind::Dot))
            {
                self.bump();
            }
            self.finish_node();
        } else {
            self.error("expected operator name");
        }

        if self.at(TokenKind::Colon) {
            self.start_node(SyntaxKind::OperatorPrecedenceClause);
            self.bump(); // :
            self.expect(TokenKind::Ident, "expected precedence group name");
            while self.at(TokenKind::Comma) && self.peek_kind_n(1) == TokenKind::Ident {
                self.bump();
                self.bump();
            }
            self.finish_node();
        } else if self.at(TokenKind::LBrace) {
            self.error_and_bump("operator bodies are not supported");
        }
    }

    fn parse_precedence_group_rest(&mut self) {
        self.bump(); // precedencegroup
        self.parse_name();

        if !self.expect(TokenKind::LBrace, "expected '{' in precedence group") {
            return;
        }

        while !self.at(TokenKind::RBrace) && !self.at_end() {
            if self.at(TokenKind::Ident) && self.peek_kind_n(1) == TokenKind::Colon {
                self.start_node(SyntaxKind::PrecedenceGroupAttribute);
                self.bump(); // label
                self.bump(); // :
                loop {
                    if matches!(
                        self.current(),
                        TokenKind::Ident | TokenKind::KwTrue | TokenKind::KwFalse
                    ) {
                        self.bump();
                    }
                    if self.at(TokenKind::Comma) && self.peek_kind_n(1) == TokenKind::Ident {
                        self.bump();
                    } else {
                        break;
                    }
                }
                self.finish_node();
            } else {
                self.error_and_bump("expected precedence group attribute");
            }
        }

        self.expect(TokenKind::RBrace, "expected '}' to close precedence group");
    }

    fn parse_enum_case_rest(&mut self) {
        self.bump(); // case

        loop {
            self.start_node(SyntaxKind::EnumCaseElement);
            self.parse_name();
            if self.at(TokenKind::LParen) {
                self.parse_enum_case_parameter_clause();
            }
            if self.at(TokenKind::Eq) {
                self.parse_initializer_clause(ExprContext::INITIALIZER);
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn parse_enum_case_parameter_clause(&mut self) {
        self.start_node(SyntaxKind::EnumCaseParameterClause);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::EnumCaseParameter);
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
            self.parse_type();
            if self.at(TokenKind::Eq) {
                self.parse_initializer_clause(ExprContext::INITIALIZER);
            }
            self.finish_node();

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close associated values");
        self.finish_node();
    }

    /// Parse `#if ... #elseif ... #else ... #endif`.
    pub(crate) fn parse_if_config(&mut self, ctx: ItemContext) {
        self.start_node(SyntaxKind::IfConfigDecl);
        self.if_config_depth += 1;

        self.parse_if_config_clause(ctx);
        while self.at(TokenKind::PoundElseif) || self.at(TokenKind::PoundElse) {
            self.parse_if_config_clause(ctx);
        }

        self.if_config_depth -= 1;
        self.expect(TokenKind::PoundEndif, "expected '#endif'");
        self.finish_node();
    }

    fn parse_if_config_clause(&mut self, ctx: ItemContext) {
        self.start_node(SyntaxKind::IfConfigClause);
        let is_else = self.at(TokenKind::PoundElse);
        self.bump(); // #if / #elseif / #else

        if !is_else {
            self.start_node(SyntaxKind::IfConfigCondition);
            if self.at_end() || self.newline_before(0) {
                self.error("expected condition after directive");
            } else {
                self.bump_balanced();
                while !self.at_end() && !self.newline_before(0) {
                    self.bump_balanced();
                }
            }
            self.finish_node();
        }

        self.parse_item_list(ctx);
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax::SyntaxKind;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        parse(source)
            .syntax()
            .descendants()
            .map(|node| node.kind())
            .collect()
    }

    #[test]
    fn test_class_keyword_as_modifier() {
        let found = kinds("class A { class func make() {} class var shared: A { A() } }");
        assert_eq!(
            found.iter().filter(|kind| **kind == SyntaxKind::ClassDecl).count(),
            1
        );
        assert!(found.contains(&SyntaxKind::FunctionDecl));
        assert!(found.contains(&SyntaxKind::VariableDecl));
    }

    #[test]
    fn test_modifier_looking_call_is_statement() {
        let parse = parse("open(file)\n");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert!(!kinds("open(file)\n").contains(&SyntaxKind::ModifierList));
    }

    #[test]
    fn test_statement_in_member_block_is_unexpected() {
        let parse = parse("struct S { if x { let y = 1 } }");
        assert!(!parse.ok());
        let found = kinds("struct S { if x { let y = 1 } }");
        assert!(found.contains(&SyntaxKind::Unexpected));
        assert!(found.contains(&SyntaxKind::VariableDecl));
    }

    #[test]
    fn test_if_config_in_members() {
        let source = "struct S {\n#if DEBUG\n  var a = 1\n#elseif os(iOS)\n  var b = 2\n#else\n  var c = 3\n#endif\n}";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        let found = kinds(source);
        assert_eq!(
            found.iter().filter(|kind| **kind == SyntaxKind::IfConfigClause).count(),
            3
        );
        assert_eq!(
            found.iter().filter(|kind| **kind == SyntaxKind::IfConfigCondition).count(),
            2
        );
    }
}
