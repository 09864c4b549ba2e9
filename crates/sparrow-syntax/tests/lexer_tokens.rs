use sparrow_syntax::lexer::{lex, lex_with_text, TokenKind};

fn significant(source: &str) -> Vec<(TokenKind, &str)> {
    lex_with_text(source)
        .into_iter()
        .filter(|(token, _)| !token.kind.is_trivia())
        .map(|(token, text)| (token.kind, text))
        .collect()
}

#[test]
fn test_lexing_is_lossless() {
    let source = "/* a /* nested */ comment */\nstruct S { let s = \"x\\(y)\" } // done\n";
    let rebuilt: String = lex_with_text(source)
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn test_nested_block_comment_is_one_token() {
    let tokens = lex("/* a /* b */ c */x");
    assert_eq!(tokens[0].kind, TokenKind::BlockComment);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
}

#[test]
fn test_raw_and_multiline_strings() {
    let source = "#\"say \"hi\"\"# \"\"\"\nline \"one\"\n\"\"\"";
    let tokens = significant(source);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], (TokenKind::StringLiteral, "#\"say \"hi\"\"#"));
    assert_eq!(tokens[1].0, TokenKind::StringLiteral);
}

#[test]
fn test_interpolation_with_nested_quotes() {
    let tokens = significant(r#"let s = "a \(dict["k"] ?? "none") b""#);
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[3].1, r#""a \(dict["k"] ?? "none") b""#);
}

#[test]
fn test_identifier_forms() {
    let tokens = significant("`class` $0 _ _value café");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Ident, "`class`"),
            (TokenKind::Ident, "$0"),
            (TokenKind::Underscore, "_"),
            (TokenKind::Ident, "_value"),
            (TokenKind::Ident, "café"),
        ]
    );
}

#[test]
fn test_directives() {
    let kinds: Vec<_> = significant("#if DEBUG\n#elseif os(iOS)\n#else\n#endif #available")
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::PoundIf,
            TokenKind::Ident,
            TokenKind::PoundElseif,
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::PoundElse,
            TokenKind::PoundEndif,
            TokenKind::PoundIdent,
        ]
    );
}

#[test]
fn test_postfix_runs_in_types() {
    let kinds: Vec<_> = significant("[String: Int?]? x!")
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LBracket,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::Question,
            TokenKind::RBracket,
            TokenKind::Question,
            TokenKind::Ident,
            TokenKind::Exclamation,
        ]
    );
}

#[test]
fn test_unknown_character_is_error_token() {
    let tokens = significant("let a = 1 \u{0}");
    assert_eq!(tokens.last().map(|(kind, _)| *kind), Some(TokenKind::Error));
}
