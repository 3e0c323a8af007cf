//! Expression AST nodes

use std::fmt;

use crate::common::Span;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal: 42. Kept as source digits, the checker only needs its type.
    IntLiteral(String),

    /// Real literal: 3.14
    RealLiteral(f64),

    /// Boolean literal: true, false
    BoolLiteral(bool),

    /// List literal: [1, 2, 3]
    List(Vec<Expr>),

    /// Identifier used as a value: foo
    Identifier(String),

    /// Unary operation: -x, !flag
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Additive chain: a + b - c
    Additive(Chain<AddOp>),

    /// Multiplicative chain: a * b / c
    Multiplicative(Chain<MulOp>),

    /// Logical chain: a && b || c
    Logical(Chain<LogicOp>),

    /// Relational or equality comparison: a < b, a == b.
    ///
    /// Without an operator the node only wraps `left`.
    Compare {
        left: Box<Expr>,
        rhs: Option<(CompareOp, Box<Expr>)>,
    },

    /// Ternary conditional: cond ? then : else
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
}

/// Renders the expression back as source, with every compound
/// subexpression parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::IntLiteral(digits) => f.write_str(digits),
            ExprKind::RealLiteral(value) => write!(f, "{value:?}"),
            ExprKind::BoolLiteral(value) => write!(f, "{value}"),
            ExprKind::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Unary { op, operand } => write!(f, "{}{operand}", op.as_str()),
            ExprKind::Additive(chain) => write_chain(f, chain, AddOp::as_str),
            ExprKind::Multiplicative(chain) => write_chain(f, chain, MulOp::as_str),
            ExprKind::Logical(chain) => write_chain(f, chain, LogicOp::as_str),
            ExprKind::Compare { left, rhs: None } => write!(f, "{left}"),
            ExprKind::Compare {
                left,
                rhs: Some((op, right)),
            } => write!(f, "({left} {} {right})", op.as_str()),
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => write!(f, "({condition} ? {then_expr} : {else_expr})"),
        }
    }
}

fn write_chain<Op>(
    f: &mut fmt::Formatter<'_>,
    chain: &Chain<Op>,
    symbol: fn(&Op) -> &'static str,
) -> fmt::Result {
    write!(f, "({}", chain.first)?;
    for (op, operand) in &chain.rest {
        write!(f, " {} {operand}", symbol(op))?;
    }
    f.write_str(")")
}

/// An n-ary operator chain: `first op rest[0].1 op rest[1].1 ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<Op> {
    pub first: Box<Expr>,
    pub rest: Vec<(Op, Expr)>,
}

impl<Op> Chain<Op> {
    pub fn new(first: Expr, rest: Vec<(Op, Expr)>) -> Self {
        Self {
            first: Box::new(first),
            rest,
        }
    }

    /// All operands, in source order
    pub fn operands(&self) -> impl Iterator<Item = &Expr> {
        std::iter::once(self.first.as_ref()).chain(self.rest.iter().map(|(_, e)| e))
    }

    /// Number of operator links between operands
    pub fn links(&self) -> usize {
        self.rest.len()
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -x
    Not, // !x
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

impl AddOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddOp::Add => "+",
            AddOp::Sub => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
    Mod,
}

impl MulOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MulOp::Mul => "*",
            MulOp::Div => "/",
            MulOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

/// Relational and equality operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    /// `<`, `>`, `<=`, `>=`: numeric operands only
    pub fn is_ordering(&self) -> bool {
        matches!(self, CompareOp::Lt | CompareOp::Gt | CompareOp::Le | CompareOp::Ge)
    }

    /// `==`, `!=`: operands of the same type
    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }
}
