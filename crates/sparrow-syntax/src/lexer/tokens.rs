//! Token definitions for Swift source text.
//!
//! The token kinds are shared between the `logos` lexer and the `rowan`
//! syntax tree. Contextual keywords (`mutating`, `public`, `get`, `actor`,
//! `async`, ...) are lexed as [`TokenKind::Ident`] and recognized by the
//! parser from their text, so they stay usable as ordinary identifiers.

use logos::Logos;

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
            continue;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let multiline = lex.slice().len() == 3;
    finish_string(lex, multiline, 0)
}

fn lex_raw_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let pounds = lex.slice().len() - 1;
    let multiline = lex.remainder().starts_with("\"\"");
    if multiline {
        lex.bump(2);
    }
    finish_string(lex, multiline, pounds)
}

fn finish_string(lex: &mut logos::Lexer<TokenKind>, multiline: bool, pounds: usize) -> bool {
    let bytes = lex.remainder().as_bytes();
    match scan_string_body(bytes, 0, multiline, pounds) {
        Some(end) => {
            lex.bump(end);
            true
        }
        None => {
            let stop = if multiline {
                bytes.len()
            } else {
                bytes.iter().position(|b| *b == b'\n').unwrap_or(bytes.len())
            };
            lex.bump(stop);
            false
        }
    }
}

/// Scans a string body starting right after the opening delimiter.
///
/// Returns the index just past the closing delimiter, or `None` when the
/// literal is unterminated.
fn scan_string_body(bytes: &[u8], mut i: usize, multiline: bool, pounds: usize) -> Option<usize> {
    let quotes = if multiline { 3 } else { 1 };
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'\n' && !multiline {
            return None;
        }
        if byte == b'\\' && has_pounds(bytes, i + 1, pounds) {
            let after = i + 1 + pounds;
            if bytes.get(after) == Some(&b'(') {
                i = scan_interpolation(bytes, after + 1)?;
            } else {
                i = after + 1;
            }
            continue;
        }
        if byte == b'"'
            && bytes[i..].iter().take(quotes).filter(|b| **b == b'"').count() == quotes
            && has_pounds(bytes, i + quotes, pounds)
        {
            return Some(i + quotes + pounds);
        }
        i += 1;
    }
    None
}

fn has_pounds(bytes: &[u8], start: usize, pounds: usize) -> bool {
    (0..pounds).all(|offset| bytes.get(start + offset) == Some(&b'#'))
}

fn scan_interpolation(bytes: &[u8], mut i: usize) -> Option<usize> {
    let mut depth = 1usize;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'"' => {
                let multiline = bytes[i..].starts_with(b"\"\"\"");
                let start = if multiline { i + 3 } else { i + 1 };
                i = scan_string_body(bytes, start, multiline, 0)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// All token kinds produced by the Swift lexer.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Punctuation and operators
/// - Compiler directives (`#if`, `#available`, ...)
/// - Reserved keywords
/// - Literals and identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace, including newlines
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Line comment: `// ...` or `/// ...`
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: `/* ... */` (supports nesting)
    #[token("/*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `,`
    #[token(",")]
    Comma,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `.`
    #[token(".")]
    Dot,

    /// `@`
    #[token("@")]
    At,

    /// `\` (key path root)
    #[token("\\")]
    Backslash,

    /// `=`
    #[token("=", priority = 10)]
    Eq,

    /// `->`
    #[token("->", priority = 10)]
    Arrow,

    /// `...`
    #[token("...")]
    Ellipsis,

    /// `?`
    #[token("?", priority = 10)]
    Question,

    /// `!`
    #[token("!", priority = 10)]
    Exclamation,

    /// `&`
    #[token("&", priority = 10)]
    Amp,

    /// `<`
    #[token("<", priority = 10)]
    Lt,

    /// `>`
    #[token(">", priority = 10)]
    Gt,

    /// Any other operator run: `+`, `==`, `<~>`, `&&`, `..<`
    ///
    /// The single-character punctuation above outranks this run on an exact
    /// match; a longer run always lexes as one operator.
    #[regex(r"[=\-+!*%<>&|^~?][=\-+!*%<>&|^~?]*")]
    #[token("/")]
    #[token("/=")]
    #[token("..<")]
    Operator,

    // =========================================================================
    // COMPILER DIRECTIVES
    // =========================================================================
    /// `#if`
    #[token("#if")]
    PoundIf,

    /// `#elseif`
    #[token("#elseif")]
    PoundElseif,

    /// `#else`
    #[token("#else")]
    PoundElse,

    /// `#endif`
    #[token("#endif")]
    PoundEndif,

    /// Other pound keywords: `#available`, `#selector`, `#file`, ...
    #[regex(r"#[A-Za-z_][A-Za-z0-9_]*")]
    PoundIdent,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `as`
    #[token("as")]
    KwAs,

    /// `associatedtype`
    #[token("associatedtype")]
    KwAssociatedtype,

    /// `break`
    #[token("break")]
    KwBreak,

    /// `case`
    #[token("case")]
    KwCase,

    /// `catch`
    #[token("catch")]
    KwCatch,

    /// `class`
    #[token("class")]
    KwClass,

    /// `continue`
    #[token("continue")]
    KwContinue,

    /// `default`
    #[token("default")]
    KwDefault,

    /// `defer`
    #[token("defer")]
    KwDefer,

    /// `deinit`
    #[token("deinit")]
    KwDeinit,

    /// `do`
    #[token("do")]
    KwDo,

    /// `else`
    #[token("else")]
    KwElse,

    /// `enum`
    #[token("enum")]
    KwEnum,

    /// `extension`
    #[token("extension")]
    KwExtension,

    /// `fallthrough`
    #[token("fallthrough")]
    KwFallthrough,

    /// `false`
    #[token("false")]
    KwFalse,

    /// `for`
    #[token("for")]
    KwFor,

    /// `func`
    #[token("func")]
    KwFunc,

    /// `guard`
    #[token("guard")]
    KwGuard,

    /// `if`
    #[token("if")]
    KwIf,

    /// `import`
    #[token("import")]
    KwImport,

    /// `in`
    #[token("in")]
    KwIn,

    /// `init`
    #[token("init")]
    KwInit,

    /// `inout`
    #[token("inout")]
    KwInout,

    /// `is`
    #[token("is")]
    KwIs,

    /// `let`
    #[token("let")]
    KwLet,

    /// `nil`
    #[token("nil")]
    KwNil,

    /// `operator`
    #[token("operator")]
    KwOperator,

    /// `precedencegroup`
    #[token("precedencegroup")]
    KwPrecedencegroup,

    /// `protocol`
    #[token("protocol")]
    KwProtocol,

    /// `repeat`
    #[token("repeat")]
    KwRepeat,

    /// `rethrows`
    #[token("rethrows")]
    KwRethrows,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `self`
    #[token("self")]
    KwSelf,

    /// `Self`
    #[token("Self")]
    KwCapitalSelf,

    /// `static`
    #[token("static")]
    KwStatic,

    /// `struct`
    #[token("struct")]
    KwStruct,

    /// `subscript`
    #[token("subscript")]
    KwSubscript,

    /// `super`
    #[token("super")]
    KwSuper,

    /// `switch`
    #[token("switch")]
    KwSwitch,

    /// `throw`
    #[token("throw")]
    KwThrow,

    /// `throws`
    #[token("throws")]
    KwThrows,

    /// `true`
    #[token("true")]
    KwTrue,

    /// `try`
    #[token("try")]
    KwTry,

    /// `typealias`
    #[token("typealias")]
    KwTypealias,

    /// `var`
    #[token("var")]
    KwVar,

    /// `where`
    #[token("where")]
    KwWhere,

    /// `while`
    #[token("while")]
    KwWhile,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: `42`, `1_000`, `0xFF`, `0o17`, `0b1010`
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9A-Fa-f][0-9A-Fa-f_]*")]
    #[regex(r"0o[0-7][0-7_]*")]
    #[regex(r"0b[01][01_]*")]
    IntLiteral,

    /// Floating point literal: `3.14`, `1e10`, `2.5e-3`
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    FloatLiteral,

    /// String literal, including multi-line, raw and interpolated forms
    #[token("\"", lex_string)]
    #[token("\"\"\"", lex_string)]
    #[regex(r##"#+""##, lex_raw_string)]
    StringLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier, backticked identifier, or dollar identifier (`$0`)
    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    #[regex(r"`[^`\r\n]+`")]
    #[regex(r"\$[A-Za-z0-9_]+")]
    Ident,

    /// `_`
    #[token("_", priority = 10)]
    Underscore,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character or unterminated literal
    #[default]
    Error,

    /// End of file marker (not produced by lexer, reported by the parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comment).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(self) -> bool {
        (Self::KwAs as u16..=Self::KwWhile as u16).contains(&(self as u16))
    }

    /// Returns `true` if this token is a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNil
        )
    }

    /// Returns `true` if this token can spell an operator or part of one.
    pub fn is_operator_like(self) -> bool {
        matches!(
            self,
            Self::Operator
                | Self::Eq
                | Self::Question
                | Self::Exclamation
                | Self::Amp
                | Self::Lt
                | Self::Gt
                | Self::Arrow
                | Self::Ellipsis
        )
    }

    /// Returns `true` if this token may be used as an argument label.
    ///
    /// Swift allows any keyword except `inout`, `var` and `let` in label position.
    pub fn is_argument_label(self) -> bool {
        match self {
            Self::Ident | Self::Underscore => true,
            Self::KwInout | Self::KwVar | Self::KwLet => false,
            kind => kind.is_keyword(),
        }
    }

    /// Returns `true` if this token opens a declaration regardless of context.
    pub fn is_decl_keyword(self) -> bool {
        matches!(
            self,
            Self::KwAssociatedtype
                | Self::KwClass
                | Self::KwDeinit
                | Self::KwEnum
                | Self::KwExtension
                | Self::KwFunc
                | Self::KwImport
                | Self::KwInit
                | Self::KwLet
                | Self::KwOperator
                | Self::KwPrecedencegroup
                | Self::KwProtocol
                | Self::KwStruct
                | Self::KwSubscript
                | Self::KwTypealias
                | Self::KwVar
        )
    }

    /// Returns `true` if this token opens a statement that is not an expression.
    pub fn is_statement_keyword(self) -> bool {
        matches!(
            self,
            Self::KwBreak
                | Self::KwContinue
                | Self::KwDefer
                | Self::KwDo
                | Self::KwFallthrough
                | Self::KwFor
                | Self::KwGuard
                | Self::KwIf
                | Self::KwRepeat
                | Self::KwReturn
                | Self::KwSwitch
                | Self::KwThrow
                | Self::KwWhile
        )
    }

    /// Returns `true` if this token closes a bracketed group.
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }

    /// Returns `true` if this token is a `#if` family directive.
    pub fn is_if_config_directive(self) -> bool {
        matches!(
            self,
            Self::PoundIf | Self::PoundElseif | Self::PoundElse | Self::PoundEndif
        )
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        Self(kind as u16)
    }
}
