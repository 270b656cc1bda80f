//! Token value types produced by the lexer.
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

/// One lexical token of a source unit.
///
/// The token owns its text. For string constants the text excludes
/// the surrounding double quotes.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub pos: SourcePos,
}

impl Token {
    /// Shorthand for the token's text as a plain string slice.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier in the set of reserved words.
    Keyword(Keyword),
    Ident,
    /// Integer literal, decimal digits only.
    IntConst,
    /// String literal delimited by double quotes.
    StrConst,
    /// Single-character symbol from the fixed symbol set.
    Symbol(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind as T;
        match self {
            T::Keyword(keyword) => write!(f, "keyword '{}'", keyword),
            T::Ident => write!(f, "identifier"),
            T::IntConst => write!(f, "integer constant"),
            T::StrConst => write!(f, "string constant"),
            T::Symbol(c) => write!(f, "symbol '{}'", c),
        }
    }
}

/// The object language's reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl fmt::Display for Keyword {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Keyword as K;
        let name = match self {
            K::Class       => "class",
            K::Constructor => "constructor",
            K::Function    => "function",
            K::Method      => "method",
            K::Field       => "field",
            K::Static      => "static",
            K::Var         => "var",
            K::Int         => "int",
            K::Char        => "char",
            K::Boolean     => "boolean",
            K::Void        => "void",
            K::True        => "true",
            K::False       => "false",
            K::Null        => "null",
            K::This        => "this",
            K::Let         => "let",
            K::Do          => "do",
            K::If          => "if",
            K::Else        => "else",
            K::While       => "while",
            K::Return      => "return",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Keyword {
    type Err = ();

    #[rustfmt::skip]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Keyword as K;
        match s {
            "class"       => Ok(K::Class),
            "constructor" => Ok(K::Constructor),
            "function"    => Ok(K::Function),
            "method"      => Ok(K::Method),
            "field"       => Ok(K::Field),
            "static"      => Ok(K::Static),
            "var"         => Ok(K::Var),
            "int"         => Ok(K::Int),
            "char"        => Ok(K::Char),
            "boolean"     => Ok(K::Boolean),
            "void"        => Ok(K::Void),
            "true"        => Ok(K::True),
            "false"       => Ok(K::False),
            "null"        => Ok(K::Null),
            "this"        => Ok(K::This),
            "let"         => Ok(K::Let),
            "do"          => Ok(K::Do),
            "if"          => Ok(K::If),
            "else"        => Ok(K::Else),
            "while"       => Ok(K::While),
            "return"      => Ok(K::Return),
            _             => Err(()),
        }
    }
}

/// Single-character symbols recognized by the lexer.
pub(crate) fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '{' | '}'
            | '('
            | ')'
            | '['
            | ']'
            | '.'
            | ','
            | ';'
            | '+'
            | '-'
            | '*'
            | '/'
            | '&'
            | '|'
            | '<'
            | '>'
            | '='
            | '~'
    )
}

/// Line and column of a character in the source, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl SourcePos {
    pub(crate) fn start() -> Self {
        SourcePos { line: 1, column: 1 }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
