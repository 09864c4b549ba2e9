//! Syntax tree types for Swift.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

mod navigation;

pub use navigation::{next_significant_token, SyntaxNodeExt, ViewMode};

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        define_syntax_kind! {
            @emit [$($token),*]

            // Root and recovery
            /// Root node of a source file
            SourceFile,
            /// Tokens the parser could not place: recovered error region
            Unexpected,

            // Declarations
            /// `class Name ... { }`
            ClassDecl,
            /// `struct Name ... { }`
            StructDecl,
            /// `enum Name ... { }`
            EnumDecl,
            /// `protocol Name ... { }`
            ProtocolDecl,
            /// `extension Type ... { }`
            ExtensionDecl,
            /// `actor Name ... { }`
            ActorDecl,
            /// `func name(...) -> T { }`
            FunctionDecl,
            /// `init(...) { }`
            InitializerDecl,
            /// `deinit { }`
            DeinitializerDecl,
            /// `subscript(...) -> T { }`
            SubscriptDecl,
            /// `var`/`let` declaration with one or more bindings
            VariableDecl,
            /// `typealias Name = Type`
            TypeAliasDecl,
            /// `associatedtype Name: Bound = Default`
            AssociatedTypeDecl,
            /// `import Module.Sub`
            ImportDecl,
            /// `infix operator <~> : Group`
            OperatorDecl,
            /// `precedencegroup Name { ... }`
            PrecedenceGroupDecl,
            /// `case a, b(Int)` inside an enum
            EnumCaseDecl,
            /// One element of an enum case declaration
            EnumCaseElement,
            /// `#if ... #endif`
            IfConfigDecl,
            /// One `#if`/`#elseif`/`#else` branch
            IfConfigClause,
            /// Condition tokens of a `#if`/`#elseif` branch
            IfConfigCondition,

            // Declaration parts
            /// Attributes preceding a declaration or type
            AttributeList,
            /// `@name(arguments)`
            Attribute,
            /// Parenthesized attribute arguments
            AttributeArguments,
            /// One attribute argument, optionally labeled
            AttributeArgument,
            /// Declaration modifiers
            ModifierList,
            /// `public`, `private(set)`, `static`, ...
            Modifier,
            /// `(set)` detail of a modifier
            ModifierDetail,
            /// A declared name
            Name,
            /// `Foundation.NSObject` in an import
            ImportPath,
            /// `<T, U: Bound>`
            GenericParameterClause,
            /// One generic parameter
            GenericParameter,
            /// `<Element>` after a protocol name
            PrimaryAssociatedTypeClause,
            /// `where ...`
            GenericWhereClause,
            /// `A == B`
            SameTypeRequirement,
            /// `A: B`
            ConformanceRequirement,
            /// `Self: _Trivial(64)` style layout constraint
            LayoutRequirement,
            /// `: A, B`
            InheritanceClause,
            /// One inherited type
            InheritedType,
            /// `{ members }` of a nominal type or extension
            MemberBlock,
            /// `{ statements }`
            CodeBlock,
            /// Parameter clause plus effects plus return clause
            FunctionSignature,
            /// `(params)`
            ParameterClause,
            /// One function or subscript parameter
            Parameter,
            /// `async throws`
            EffectSpecifiers,
            /// `-> Type`
            ReturnClause,
            /// `: Type`
            TypeAnnotation,
            /// `= value`
            InitializerClause,
            /// `= Type` in a typealias or associated type
            TypeInitializerClause,
            /// Comma separated pattern bindings
            PatternBindingList,
            /// `name: Type = value { accessors }`
            PatternBinding,
            /// `{ get set }` or a computed body
            AccessorBlock,
            /// `get { }`, `set(newValue) { }`, ...
            Accessor,
            /// `(newValue)` of a setter or observer
            AccessorParameter,
            /// `(Int, label: String)` of an enum case
            EnumCaseParameterClause,
            /// One associated value of an enum case
            EnumCaseParameter,
            /// `higherThan: X` inside a precedence group
            PrecedenceGroupAttribute,
            /// `: Group` after an operator declaration
            OperatorPrecedenceClause,

            // Types
            /// `Name`, `Module.Name`, `Name<Args>`
            SimpleType,
            /// `<A, B>` after a type name
            GenericArgumentClause,
            /// One generic argument
            GenericArgument,
            /// `T?`
            OptionalType,
            /// `T!`
            ImplicitlyUnwrappedOptionalType,
            /// `[T]`
            ArrayType,
            /// `[K: V]`
            DictionaryType,
            /// `(A, b: B)`
            TupleType,
            /// One tuple type element
            TupleTypeElement,
            /// `(A) async throws -> B`
            FunctionType,
            /// `inout T`, `@escaping T`
            AttributedType,
            /// `some P`, `any P`
            SomeOrAnyType,
            /// `A & B`
            CompositionType,
            /// `T.Type`, `P.Protocol`
            MetatypeType,

            // Statements
            /// `if cond { } else { }`
            IfStmt,
            /// `guard cond else { }`
            GuardStmt,
            /// `for x in seq { }`
            ForStmt,
            /// `while cond { }`
            WhileStmt,
            /// `repeat { } while cond`
            RepeatStmt,
            /// `do { } catch { }`
            DoStmt,
            /// `catch pattern { }`
            CatchClause,
            /// `defer { }`
            DeferStmt,
            /// `return value`
            ReturnStmt,
            /// `throw error`
            ThrowStmt,
            /// `break label`
            BreakStmt,
            /// `continue label`
            ContinueStmt,
            /// `fallthrough`
            FallthroughStmt,
            /// Expression in statement position
            ExprStmt,
            /// Condition of an `if`, `guard` or `while`
            Condition,
            /// `switch subject { cases }`
            SwitchExpr,
            /// `case ...: statements` or `default: statements`
            SwitchCase,
            /// `case a, b where c:`
            SwitchCaseLabel,
            /// `default:`
            SwitchDefaultLabel,
            /// One pattern in a case label
            CaseItem,
            /// `where condition`
            WhereClause,

            // Patterns
            /// Expression used as a pattern
            ExpressionPattern,
            /// Bound name
            IdentifierPattern,
            /// `_`
            WildcardPattern,
            /// `let pattern` or `var pattern`
            ValueBindingPattern,
            /// `is Type`
            IsTypePattern,
            /// `(a, b)`
            TuplePattern,
            /// One element of a tuple pattern
            TuplePatternElement,
            /// `pattern as Type`
            AsPattern,

            // Expressions
            /// Balanced token run without further structure
            Expr,
            /// `{ params in statements }`
            ClosureExpr,
            /// `(params) -> T in`
            ClosureSignature,
            /// `.member` or `base.member`
            MemberAccessExpr,
            /// Plain name reference
            DeclReferenceExpr,
            /// `callee(arguments)`
            FunctionCallExpr,
            /// Call arguments
            LabeledExprList,
            /// One call argument, optionally labeled
            LabeledExpr,
            /// Literal value
            LiteralExpr,
        }
    };
    (@emit [$($token:ident),*] $($(#[$meta:meta])* $node:ident,)*) => {
        /// All syntax node and token kinds in Swift.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // =========================================================================
            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            $($(#[$meta])* $node,)*
        }

        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            $(SyntaxKind::$node,)*
        ];
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` if this node kind is a type expression.
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::SimpleType
                | Self::OptionalType
                | Self::ImplicitlyUnwrappedOptionalType
                | Self::ArrayType
                | Self::DictionaryType
                | Self::TupleType
                | Self::FunctionType
                | Self::AttributedType
                | Self::SomeOrAnyType
                | Self::CompositionType
                | Self::MetatypeType
        )
    }

    /// Returns `true` if this node kind is a pattern.
    #[must_use]
    pub fn is_pattern(self) -> bool {
        (Self::ExpressionPattern as u16..=Self::AsPattern as u16).contains(&(self as u16))
    }

    /// Returns `true` if this node kind is a declaration.
    #[must_use]
    pub fn is_declaration(self) -> bool {
        (Self::ClassDecl as u16..=Self::IfConfigDecl as u16).contains(&(self as u16))
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Swift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SwiftLanguage {}

impl rowan::Language for SwiftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the Swift syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<SwiftLanguage>;

/// A syntax token in the Swift syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<SwiftLanguage>;

/// A syntax element (either node or token) in the Swift syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<SwiftLanguage>;

/// A builder for syntax trees.
pub type SyntaxTreeBuilder = rowan::GreenNodeBuilder<'static>;
