//! Shared list of token kinds.
//!
//! `TokenKind` (lexer) and `SyntaxKind` (tree) must agree on the order of
//! every token variant. Both are generated from this list.

macro_rules! for_each_token_kind {
    ($m:ident) => {
        $m! {
            Whitespace,
            LineComment,
            BlockComment,
            LParen,
            RParen,
            LBracket,
            RBracket,
            LBrace,
            RBrace,
            Comma,
            Colon,
            Semicolon,
            Dot,
            At,
            Backslash,
            Eq,
            Arrow,
            Ellipsis,
            Question,
            Exclamation,
            Amp,
            Lt,
            Gt,
            Operator,
            PoundIf,
            PoundElseif,
            PoundElse,
            PoundEndif,
            PoundIdent,
            KwAs,
            KwAssociatedtype,
            KwBreak,
            KwCase,
            KwCatch,
            KwClass,
            KwContinue,
            KwDefault,
            KwDefer,
            KwDeinit,
            KwDo,
            KwElse,
            KwEnum,
            KwExtension,
            KwFallthrough,
            KwFalse,
            KwFor,
            KwFunc,
            KwGuard,
            KwIf,
            KwImport,
            KwIn,
            KwInit,
            KwInout,
            KwIs,
            KwLet,
            KwNil,
            KwOperator,
            KwPrecedencegroup,
            KwProtocol,
            KwRepeat,
            KwRethrows,
            KwReturn,
            KwSelf,
            KwCapitalSelf,
            KwStatic,
            KwStruct,
            KwSubscript,
            KwSuper,
            KwSwitch,
            KwThrow,
            KwThrows,
            KwTrue,
            KwTry,
            KwTypealias,
            KwVar,
            KwWhere,
            KwWhile,
            IntLiteral,
            FloatLiteral,
            StringLiteral,
            Ident,
            Underscore,
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
