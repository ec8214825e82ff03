//! Syntax tree produced by the regex parser.

use std::fmt;

/// Regular expression syntax tree.
///
/// Each inner node owns its children. The set of variants is closed, so
/// every consumer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Literal(char),
    Concat(Box<Ast>, Box<Ast>),
    Union(Box<Ast>, Box<Ast>),
    Star(Box<Ast>),
    Plus(Box<Ast>),
    Optional(Box<Ast>),
}

impl Ast {
    pub fn concat(left: Ast, right: Ast) -> Ast {
        Ast::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Ast, right: Ast) -> Ast {
        Ast::Union(Box::new(left), Box::new(right))
    }

    pub fn star(child: Ast) -> Ast {
        Ast::Star(Box::new(child))
    }

    pub fn plus(child: Ast) -> Ast {
        Ast::Plus(Box::new(child))
    }

    pub fn optional(child: Ast) -> Ast {
        Ast::Optional(Box::new(child))
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                Ast::Literal(_) => {}
                Ast::Concat(left, right) | Ast::Union(left, right) => {
                    stack.push(left);
                    stack.push(right);
                }
                Ast::Star(child) | Ast::Plus(child) | Ast::Optional(child) => stack.push(child),
            }
        }
        count
    }

    /// Move the boxed children out, leaving leaves in their place.
    fn take_children(&mut self, out: &mut Vec<Ast>) {
        let mut take = |child: &mut Box<Ast>| {
            out.push(std::mem::replace(&mut **child, Ast::Literal(' ')));
        };
        match self {
            Ast::Literal(_) => {}
            Ast::Concat(left, right) | Ast::Union(left, right) => {
                take(left);
                take(right);
            }
            Ast::Star(child) | Ast::Plus(child) | Ast::Optional(child) => take(child),
        }
    }
}

/// Long patterns parse into chains as deep as the pattern is long, so the
/// tree is torn down with an explicit stack.
impl Drop for Ast {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// Prints the tree back as a fully parenthesized pattern that parses to an
/// equal tree.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Literal(ch) => write!(f, "{ch}"),
            Ast::Concat(left, right) => write!(f, "({left}{right})"),
            Ast::Union(left, right) => write!(f, "({left}|{right})"),
            Ast::Star(child) => write!(f, "{child}*"),
            Ast::Plus(child) => write!(f, "{child}+"),
            Ast::Optional(child) => write!(f, "{child}?"),
        }
    }
}
