//! Error types for the compilation pipeline and the definition boundary.

use crate::regex::TokenKind;
use thiserror::Error;

/// Errors raised while compiling a pattern or importing a definition.
///
/// Every error is terminal for the call that produced it; nothing visible to
/// the caller is left half-built.
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern contains a character the lexer does not recognize.
    #[error("invalid character {character:?} in pattern at position {position}")]
    Lex { character: char, position: usize },

    /// The token stream does not match the regex grammar.
    #[error("syntax error at position {position}: {kind}")]
    Parse {
        kind: ParseErrorKind,
        position: usize,
    },

    /// An explicit 5-tuple violates the NFA/DFA shape invariants.
    #[error("malformed automaton definition: {0}")]
    MalformedDefinition(String),

    /// A definition document could not be decoded or encoded.
    #[error("invalid definition document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The grammar rule a [`Error::Parse`] tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected a symbol or '(', found {0}")]
    ExpectedAtom(TokenKind),
    #[error("expected ')', found {0}")]
    UnclosedGroup(TokenKind),
    #[error("unexpected trailing {0}")]
    TrailingInput(TokenKind),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedDefinition(message.into())
}
