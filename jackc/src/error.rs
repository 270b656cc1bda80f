//! Compilation errors.
//!
//! Every error is fatal to the unit being compiled. There is no
//! recovery mid-unit; the batch driver reports the error and moves
//! on to the next unit.
use crate::tokens::{SourcePos, TokenKind};

use smol_str::SmolStr;
use std::{error, fmt};

#[derive(Debug, Clone)]
pub enum CompileError {
    /// The lexer ran out of characters while a token was expected.
    EndOfInput { pos: SourcePos },
    /// A newline was encountered inside a string constant before the
    /// closing quote. Reported at the end of the previous token.
    UnterminatedString { pos: SourcePos },
    /// A character that starts no valid token.
    UnexpectedCharacter { character: char, pos: SourcePos },
    /// The parser expected a token of one syntactic type but got another.
    TokenTypeMismatch {
        expected: String,
        encountered: TokenKind,
        pos: SourcePos,
    },
    /// The parser expected a specific literal value but got another.
    TokenValueMismatch {
        expected: String,
        encountered: SmolStr,
        pos: SourcePos,
    },
    /// Duplicate declaration within one scope namespace.
    NameAlreadyDefined { name: SmolStr, pos: SourcePos },
    /// Identifier not found in any enclosing scope.
    UndefinedName { name: SmolStr, pos: SourcePos },
    /// The parsed class name does not match the expected output unit name.
    UnitNameMismatch { class: SmolStr, unit: String },
}

impl CompileError {
    /// Source position the error refers to.
    ///
    /// The unit-name check runs after parsing completes and has no
    /// single offending token; it reports the start of the unit.
    pub fn pos(&self) -> SourcePos {
        use CompileError as E;
        match self {
            E::EndOfInput { pos }
            | E::UnterminatedString { pos }
            | E::UnexpectedCharacter { pos, .. }
            | E::TokenTypeMismatch { pos, .. }
            | E::TokenValueMismatch { pos, .. }
            | E::NameAlreadyDefined { pos, .. }
            | E::UndefinedName { pos, .. } => *pos,
            E::UnitNameMismatch { .. } => SourcePos::start(),
        }
    }
}

impl error::Error for CompileError {}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use CompileError as E;
        match self {
            E::EndOfInput { pos } => {
                write!(f, "{}: end of input reached", pos)
            }
            E::UnterminatedString { pos } => {
                write!(f, "{}: unterminated string", pos)
            }
            E::UnexpectedCharacter { character, pos } => {
                write!(f, "{}: unexpected character {:?}", pos, character)
            }
            E::TokenTypeMismatch {
                expected,
                encountered,
                pos,
            } => {
                write!(f, "{}: expected {} and got {}", pos, expected, encountered)
            }
            E::TokenValueMismatch {
                expected,
                encountered,
                pos,
            } => {
                write!(f, "{}: expected \"{}\" and got \"{}\"", pos, expected, encountered)
            }
            E::NameAlreadyDefined { name, pos } => {
                write!(f, "{}: \"{}\" was already defined", pos, name)
            }
            E::UndefinedName { name, pos } => {
                write!(f, "{}: \"{}\" is not defined in any enclosing scope", pos, name)
            }
            E::UnitNameMismatch { class, unit } => {
                write!(f, "class name \"{}\" does not match unit name \"{}\"", class, unit)
            }
        }
    }
}
