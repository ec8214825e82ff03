//! Recursive-descent parser for regular expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! regex  ::= union
//! union  ::= concat ('|' concat)*
//! concat ::= repeat+
//! repeat ::= atom ('*' | '+' | '?')*
//! atom   ::= CHAR | '(' regex ')'
//! ```
//!
//! Concatenation has no operator token; two adjacent repeats concatenate.
//! Group nesting is limited only by the call stack.

use super::ast::Ast;
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::error::{Error, ParseErrorKind, Result};
use log::debug;

/// Parse `text` into a syntax tree.
pub fn parse(text: &str) -> Result<Ast> {
    Parser::new(text)?.parse()
}

pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    /// Create a parser positioned on the first token of `text`.
    pub fn new(text: &str) -> Result<Self> {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the whole input; trailing tokens are an error.
    pub fn parse(mut self) -> Result<Ast> {
        let ast = self.regex()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.error(ParseErrorKind::TrailingInput(self.current.kind)));
        }
        debug!("parsed pattern into {} AST nodes", ast.size());
        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        Error::Parse {
            kind,
            position: self.current.position,
        }
    }

    fn regex(&mut self) -> Result<Ast> {
        self.union()
    }

    fn union(&mut self) -> Result<Ast> {
        let mut node = self.concat()?;
        while self.current.kind == TokenKind::Union {
            self.advance()?;
            let right = self.concat()?;
            node = Ast::union(node, right);
        }
        Ok(node)
    }

    fn concat(&mut self) -> Result<Ast> {
        let mut node = self.repeat()?;
        while self.current.kind.starts_atom() {
            let right = self.repeat()?;
            node = Ast::concat(node, right);
        }
        Ok(node)
    }

    fn repeat(&mut self) -> Result<Ast> {
        let mut node = self.atom()?;
        loop {
            node = match self.current.kind {
                TokenKind::Star => Ast::star(node),
                TokenKind::Plus => Ast::plus(node),
                TokenKind::Question => Ast::optional(node),
                _ => return Ok(node),
            };
            self.advance()?;
        }
    }

    fn atom(&mut self) -> Result<Ast> {
        match self.current.kind {
            TokenKind::Char(ch) => {
                self.advance()?;
                Ok(Ast::Literal(ch))
            }
            TokenKind::LParen => {
                self.advance()?;
                let node = self.regex()?;
                if self.current.kind != TokenKind::RParen {
                    return Err(self.error(ParseErrorKind::UnclosedGroup(self.current.kind)));
                }
                self.advance()?;
                Ok(node)
            }
            found => Err(self.error(ParseErrorKind::ExpectedAtom(found))),
        }
    }
}
