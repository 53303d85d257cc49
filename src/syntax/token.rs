use std::fmt;

use fnv::FnvHashMap;

use super::trivia::Trivia;
use crate::span::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IntegerBase {
    Decimal,
    Binary,
    Octal,
    Hex,
}

impl IntegerBase {
    pub fn prefix(&self) -> &str {
        match self {
            IntegerBase::Binary => "0b",
            IntegerBase::Octal => "0o",
            IntegerBase::Hex => "0x",
            IntegerBase::Decimal => "",
        }
    }
}

/// Reserved words. Spelled exactly as in source, see [`Keyword::as_str`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    // declarations
    Associatedtype,
    Class,
    Deinit,
    Enum,
    Extension,
    Fileprivate,
    Func,
    Import,
    Init,
    Inout,
    Internal,
    Let,
    Operator,
    Precedencegroup,
    Private,
    Protocol,
    Public,
    Static,
    Struct,
    Subscript,
    Typealias,
    Var,

    // statements
    Break,
    Case,
    Continue,
    Default,
    Defer,
    Do,
    Else,
    Fallthrough,
    For,
    Guard,
    If,
    In,
    Repeat,
    Return,
    Switch,
    Where,
    While,

    // expressions and types
    As,
    Any,
    Catch,
    False,
    Is,
    Nil,
    Rethrows,
    Super,
    SelfValue,
    SelfType,
    Throw,
    Throws,
    True,
    Try,
    Column,
    File,
    Function,
    Line,
    Wildcard,
}

pub const KEYWORDS: &[Keyword] = &[
    Keyword::Associatedtype,
    Keyword::Class,
    Keyword::Deinit,
    Keyword::Enum,
    Keyword::Extension,
    Keyword::Fileprivate,
    Keyword::Func,
    Keyword::Import,
    Keyword::Init,
    Keyword::Inout,
    Keyword::Internal,
    Keyword::Let,
    Keyword::Operator,
    Keyword::Precedencegroup,
    Keyword::Private,
    Keyword::Protocol,
    Keyword::Public,
    Keyword::Static,
    Keyword::Struct,
    Keyword::Subscript,
    Keyword::Typealias,
    Keyword::Var,
    Keyword::Break,
    Keyword::Case,
    Keyword::Continue,
    Keyword::Default,
    Keyword::Defer,
    Keyword::Do,
    Keyword::Else,
    Keyword::Fallthrough,
    Keyword::For,
    Keyword::Guard,
    Keyword::If,
    Keyword::In,
    Keyword::Repeat,
    Keyword::Return,
    Keyword::Switch,
    Keyword::Where,
    Keyword::While,
    Keyword::As,
    Keyword::Any,
    Keyword::Catch,
    Keyword::False,
    Keyword::Is,
    Keyword::Nil,
    Keyword::Rethrows,
    Keyword::Super,
    Keyword::SelfValue,
    Keyword::SelfType,
    Keyword::Throw,
    Keyword::Throws,
    Keyword::True,
    Keyword::Try,
    Keyword::Column,
    Keyword::File,
    Keyword::Function,
    Keyword::Line,
    Keyword::Wildcard,
];

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Associatedtype => "associatedtype",
            Keyword::Class => "class",
            Keyword::Deinit => "deinit",
            Keyword::Enum => "enum",
            Keyword::Extension => "extension",
            Keyword::Fileprivate => "fileprivate",
            Keyword::Func => "func",
            Keyword::Import => "import",
            Keyword::Init => "init",
            Keyword::Inout => "inout",
            Keyword::Internal => "internal",
            Keyword::Let => "let",
            Keyword::Operator => "operator",
            Keyword::Precedencegroup => "precedencegroup",
            Keyword::Private => "private",
            Keyword::Protocol => "protocol",
            Keyword::Public => "public",
            Keyword::Static => "static",
            Keyword::Struct => "struct",
            Keyword::Subscript => "subscript",
            Keyword::Typealias => "typealias",
            Keyword::Var => "var",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Defer => "defer",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Fallthrough => "fallthrough",
            Keyword::For => "for",
            Keyword::Guard => "guard",
            Keyword::If => "if",
            Keyword::In => "in",
            Keyword::Repeat => "repeat",
            Keyword::Return => "return",
            Keyword::Switch => "switch",
            Keyword::Where => "where",
            Keyword::While => "while",
            Keyword::As => "as",
            Keyword::Any => "Any",
            Keyword::Catch => "catch",
            Keyword::False => "false",
            Keyword::Is => "is",
            Keyword::Nil => "nil",
            Keyword::Rethrows => "rethrows",
            Keyword::Super => "super",
            Keyword::SelfValue => "self",
            Keyword::SelfType => "Self",
            Keyword::Throw => "throw",
            Keyword::Throws => "throws",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Column => "__COLUMN__",
            Keyword::File => "__FILE__",
            Keyword::Function => "__FUNCTION__",
            Keyword::Line => "__LINE__",
            Keyword::Wildcard => "_",
        }
    }

    /// Keywords that introduce a declaration and may follow a modifier such
    /// as `override` or `mutating`.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Keyword::Associatedtype
                | Keyword::Class
                | Keyword::Deinit
                | Keyword::Enum
                | Keyword::Extension
                | Keyword::Fileprivate
                | Keyword::Func
                | Keyword::Import
                | Keyword::Init
                | Keyword::Internal
                | Keyword::Let
                | Keyword::Operator
                | Keyword::Private
                | Keyword::Protocol
                | Keyword::Public
                | Keyword::Static
                | Keyword::Struct
                | Keyword::Subscript
                | Keyword::Typealias
                | Keyword::Var
                | Keyword::Case
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PoundKeyword {
    If,
    Else,
    Elseif,
    Endif,
    SourceLocation,
    File,
    Line,
    Column,
    Dsohandle,
    Function,
    Selector,
    KeyPath,
    ColorLiteral,
    FileLiteral,
    ImageLiteral,
    Available,
    Warning,
    Error,
}

pub const POUND_KEYWORDS: &[PoundKeyword] = &[
    PoundKeyword::If,
    PoundKeyword::Else,
    PoundKeyword::Elseif,
    PoundKeyword::Endif,
    PoundKeyword::SourceLocation,
    PoundKeyword::File,
    PoundKeyword::Line,
    PoundKeyword::Column,
    PoundKeyword::Dsohandle,
    PoundKeyword::Function,
    PoundKeyword::Selector,
    PoundKeyword::KeyPath,
    PoundKeyword::ColorLiteral,
    PoundKeyword::FileLiteral,
    PoundKeyword::ImageLiteral,
    PoundKeyword::Available,
    PoundKeyword::Warning,
    PoundKeyword::Error,
];

impl PoundKeyword {
    /// The spelling without the leading `#`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PoundKeyword::If => "if",
            PoundKeyword::Else => "else",
            PoundKeyword::Elseif => "elseif",
            PoundKeyword::Endif => "endif",
            PoundKeyword::SourceLocation => "sourceLocation",
            PoundKeyword::File => "file",
            PoundKeyword::Line => "line",
            PoundKeyword::Column => "column",
            PoundKeyword::Dsohandle => "dsohandle",
            PoundKeyword::Function => "function",
            PoundKeyword::Selector => "selector",
            PoundKeyword::KeyPath => "keyPath",
            PoundKeyword::ColorLiteral => "colorLiteral",
            PoundKeyword::FileLiteral => "fileLiteral",
            PoundKeyword::ImageLiteral => "imageLiteral",
            PoundKeyword::Available => "available",
            PoundKeyword::Warning => "warning",
            PoundKeyword::Error => "error",
        }
    }
}

lazy_static! {
    pub static ref KEYWORD_TABLE: FnvHashMap<&'static str, Keyword> =
        KEYWORDS.iter().map(|kw| (kw.as_str(), *kw)).collect();
    pub static ref POUND_KEYWORD_TABLE: FnvHashMap<&'static str, PoundKeyword> =
        POUND_KEYWORDS.iter().map(|kw| (kw.as_str(), *kw)).collect();
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    PoundKeyword(PoundKeyword),

    // literals
    IntegerLiteral(IntegerBase),
    FloatingLiteral,
    /// A complete raw string such as `#"C:\path"#`
    StringLiteral,
    StringSegment,
    /// "
    StringQuote,
    /// """
    MultilineStringQuote,
    /// the `)` that closes `\(`
    StringInterpolationAnchor,

    Identifier,
    /// $0, $name
    DollarIdentifier,
    /// an identifier acting as a keyword in its position (`mutating`, `get`, ...)
    ContextualKeyword,

    // operators
    SpacedBinaryOperator,
    UnspacedBinaryOperator,
    PrefixOperator,
    PostfixOperator,
    /// prefix &
    PrefixAmpersand,
    /// postfix !
    ExclamationMark,
    /// ternary ?
    InfixQuestionMark,
    /// optional chaining ?
    PostfixQuestionMark,
    /// =
    Equal,
    /// ->
    Arrow,
    /// .
    Period,
    /// implicit member .
    PrefixPeriod,

    // delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// [
    LeftSquareBracket,
    /// ]
    RightSquareBracket,
    /// < around generic arguments
    LeftAngle,
    /// > around generic arguments
    RightAngle,

    /// ,
    Comma,
    /// :
    Colon,
    /// ;
    Semicolon,
    /// @
    AtSign,
    /// #
    Pound,
    /// \
    Backslash,

    Unknown,
    Eof,
}

impl TokenKind {
    pub fn desc(&self) -> &str {
        match self {
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::PoundKeyword(kw) => kw.as_str(),
            TokenKind::IntegerLiteral(_) => "integer",
            TokenKind::FloatingLiteral => "float",
            TokenKind::StringLiteral => "raw string",
            TokenKind::StringSegment => "string segment",
            TokenKind::StringQuote => "`\"`",
            TokenKind::MultilineStringQuote => "`\"\"\"`",
            TokenKind::StringInterpolationAnchor => "`)`",
            TokenKind::Identifier | TokenKind::DollarIdentifier => "identifier",
            TokenKind::ContextualKeyword => "contextual keyword",
            TokenKind::SpacedBinaryOperator
            | TokenKind::UnspacedBinaryOperator
            | TokenKind::PrefixOperator
            | TokenKind::PostfixOperator => "operator",
            TokenKind::PrefixAmpersand => "`&`",
            TokenKind::ExclamationMark => "`!`",
            TokenKind::InfixQuestionMark | TokenKind::PostfixQuestionMark => "`?`",
            TokenKind::Equal => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::Period | TokenKind::PrefixPeriod => "`.`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftSquareBracket => "`[`",
            TokenKind::RightSquareBracket => "`]`",
            TokenKind::LeftAngle => "`<`",
            TokenKind::RightAngle => "`>`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::AtSign => "`@`",
            TokenKind::Pound => "`#`",
            TokenKind::Backslash => "`\\`",
            TokenKind::Unknown => "unknown",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::PoundKeyword(kw) => write!(f, "#{}", kw.as_str()),
            TokenKind::IntegerLiteral(base) => write!(f, "integer({})", base.prefix()),
            _ => write!(f, "{}", self.desc()),
        }
    }
}

/// A leaf of the syntax tree: one token with the trivia attached to either
/// side of it. `span` covers the token text only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenSyntax {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub leading_trivia: Trivia,
    pub trailing_trivia: Trivia,
}

impl TokenSyntax {
    /// Byte offset where the leading trivia begins.
    pub fn full_start(&self) -> usize {
        self.span.start.offset - self.leading_trivia.len()
    }

    /// Byte offset where the trailing trivia ends.
    pub fn full_end(&self) -> usize {
        self.span.end.offset + self.trailing_trivia.len()
    }
}

impl fmt::Display for TokenSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.leading_trivia, self.text, self.trailing_trivia)
    }
}
