//! Regular expression front end: text to tokens to syntax tree.
//!
//! The accepted language is deliberately small: alphanumeric literals,
//! `|` union, implicit concatenation, the `*`, `+` and `?` suffixes and
//! parenthesized groups. Whitespace between tokens is ignored.

mod ast;
mod lexer;
mod parser;
mod token;

pub use ast::Ast;
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use token::{Token, TokenKind};
