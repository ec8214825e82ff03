//! Tokens handed from the lexer to the parser.

use std::fmt;

/// The tag of a lexed token. `Char` carries the literal symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Char(char),
    Star,
    Plus,
    Question,
    Union,
    LParen,
    RParen,
    Eof,
}

/// A token together with the character offset it started at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl TokenKind {
    /// Whether this token can begin an atom, i.e. continue a concatenation.
    pub fn starts_atom(self) -> bool {
        matches!(self, TokenKind::Char(_) | TokenKind::LParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Char(ch) => write!(f, "symbol {ch:?}"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Question => f.write_str("'?'"),
            TokenKind::Union => f.write_str("'|'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Eof => f.write_str("end of pattern"),
        }
    }
}
