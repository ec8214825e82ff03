//! Token stream over a pattern string.

use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Produces tokens lazily, one per call to [`Lexer::next_token`].
///
/// Once the input is exhausted every further call yields `Eof`.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Return the next token, skipping whitespace.
    pub fn next_token(&mut self) -> Result<Token> {
        while let Some(ch) = self.peek() {
            let position = self.pos;
            self.pos += 1;

            let kind = match ch {
                c if c.is_whitespace() => continue,
                '|' => TokenKind::Union,
                '*' => TokenKind::Star,
                '+' => TokenKind::Plus,
                '?' => TokenKind::Question,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                c if c.is_alphanumeric() => TokenKind::Char(c),
                character => {
                    // Leave the cursor on the offending character.
                    self.pos = position;
                    return Err(Error::Lex {
                        character,
                        position,
                    });
                }
            };
            return Ok(Token { kind, position });
        }

        Ok(Token {
            kind: TokenKind::Eof,
            position: self.input.len(),
        })
    }
}
