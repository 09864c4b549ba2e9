//! Main parser implementation.

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;
use drop_bomb::DropBomb;

/// Parses source text into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens, source);
    let (events, errors) = parser.parse();

    let sink = Sink::new(&tokens, source, events);
    let green_node = sink.finish();

    Parse { green_node, errors }
}

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    pub(crate) source: Source<'t, 'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
    /// Number of enclosing `#if` blocks; `#else`/`#endif` only close one when positive.
    pub(crate) if_config_depth: u32,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(
        mut self,
        parser: &mut Parser<'_, '_>,
        kind: SyntaxKind,
    ) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::Start {
                    kind,
                    forward_parent: None,
                };
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Drops the marker without creating a node.
    pub(crate) fn abandon(mut self, parser: &mut Parser<'_, '_>) {
        self.bomb.defuse();
        if self.pos == parser.events.len() - 1 {
            if let Some(Event::Placeholder) = parser.events.last() {
                parser.events.pop();
            }
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pub(crate) pos: usize,
}

impl CompletedMarker {
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    /// Returns the kind the marker was completed with.
    pub(crate) fn kind(self, parser: &Parser<'_, '_>) -> Option<SyntaxKind> {
        match parser.events.get(self.pos) {
            Some(Event::Start { kind, .. }) => Some(*kind),
            _ => None,
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((to - current) as u32);
                break;
            }
            _ => break,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            source: Source::new(tokens, source),
            events: Vec::new(),
            errors: Vec::new(),
            if_config_depth: 0,
        }
    }

    fn parse(mut self) -> (Vec<Event>, Vec<ParseError>) {
        self.start_node(SyntaxKind::SourceFile);
        self.parse_source_file();
        self.finish_node();

        (self.events, self.errors)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.peek_kind() == kind
    }

    /// Returns `true` if the current token is an identifier spelled `text`.
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.nth_contextual(0, text)
    }

    pub(crate) fn nth_contextual(&self, n: usize, text: &str) -> bool {
        self.peek_kind_n(n) == TokenKind::Ident && self.source.peek_text_n(n) == text
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    pub(crate) fn peek_text_n(&self, n: usize) -> &'src str {
        self.source.peek_text_n(n)
    }

    pub(crate) fn current_text(&self) -> &'src str {
        self.source.current_text()
    }

    /// Returns `true` if a line break precedes the nth token ahead.
    pub(crate) fn newline_before(&self, n: usize) -> bool {
        self.source.newline_before_n(n)
    }

    /// Returns `true` if any trivia precedes the nth token ahead.
    pub(crate) fn trivia_before(&self, n: usize) -> bool {
        self.source.trivia_before_n(n)
    }

    pub(crate) fn position(&self) -> usize {
        self.source.position()
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        if kind == TokenKind::Eof {
            return;
        }
        self.events.push(Event::token(SyntaxKind::from(kind)));
        self.source.bump();
    }

    /// Bumps the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bumps the current token if it has the given kind, otherwise records an error.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(message);
            false
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.events.push(Event::start(kind));
    }

    pub(crate) fn finish_node(&mut self) {
        self.events.push(Event::Finish);
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self
            .source
            .current_token()
            .map_or_else(|| text_size::TextRange::empty(self.end_offset()), |t| t.range);

        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    fn end_offset(&self) -> text_size::TextSize {
        text_size::TextSize::of(self.source.source())
    }

    /// Records an error and wraps the current token (or bracketed group) in an
    /// `Unexpected` node.
    pub(crate) fn error_and_bump(&mut self, message: &str) {
        self.error(message);
        if self.at_end() {
            return;
        }
        self.start_node(SyntaxKind::Unexpected);
        self.bump_balanced();
        self.finish_node();
    }

    /// Bumps one token, or a whole bracketed group when at an opening bracket.
    pub(crate) fn bump_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                TokenKind::Eof => return,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::SourceFile);
    }

    #[test]
    fn test_parse_is_lossless() {
        let source = "/// Doc\npublic struct Point {\n    var x: Int // trailing\n}\n";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_nodes_do_not_own_surrounding_trivia() {
        let parse = parse("  struct A {}  ");
        let decl = parse
            .syntax()
            .children()
            .next()
            .expect("struct declaration");
        assert_eq!(decl.kind(), SyntaxKind::StructDecl);
        assert_eq!(decl.text().to_string(), "struct A {}");
    }

    #[test]
    fn test_error_recovery_keeps_every_token() {
        let source = "struct S { ) func f() {} }";
        let parse = parse(source);
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), source);
        assert!(parse
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::FunctionDecl));
    }

    #[test]
    fn test_stray_directive_does_not_hang() {
        let parse = parse("#endif\nlet x = 1");
        assert!(!parse.ok());
        assert!(parse
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::VariableDecl));
    }
}
