//! Statement AST nodes

use super::Expr;
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Variable declaration: int a = 1;
    Declare(Declaration),

    /// Assignment to an existing variable: a = 2;
    Assign {
        target: String,
        target_span: Span,
        value: Expr,
    },

    /// If statement: if (cond) { ... } [else { ... }]
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    /// While loop: while (cond) { ... }
    While {
        condition: Expr,
        body: Block,
    },

    /// Do-while loop: do { ... } while (cond);
    DoWhile {
        body: Block,
        condition: Expr,
    },

    /// Bare block: { ... }
    Block(Block),

    /// Expression statement: expr;
    Expr(Expr),
}

/// Variable declaration.
///
/// `name` is the binding being introduced, so it is never resolved as a use.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Declared type as written (`int`, `bool`, `float`, `list`, or anything else)
    pub type_name: String,
    pub name: String,
    pub name_span: Span,
    pub init: Option<Expr>,
    pub span: Span,
}

impl Declaration {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, name_span: Span, span: Span) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            name_span,
            init: None,
            span,
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }
}

/// Block: { stmt* }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }
}
