//! Abstract Syntax Tree definitions
//!
//! The tree is a closed set of node kinds: every consumer matches on
//! [`ExprKind`] and [`StmtKind`] exhaustively.

mod expr;
mod stmt;

pub use expr::*;
pub use stmt::*;

use crate::common::Span;

/// A complete program (source file)
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }
}
