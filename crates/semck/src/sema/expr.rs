//! Expression type evaluation

use tracing::trace;

use crate::common::{SemaResult, SemanticError};
use crate::frontend::ast::*;
use super::{Scope, SemanticAnalyzer, Type};

impl SemanticAnalyzer {
    /// Compute the type of `expr`, failing on the first incompatibility below it
    pub fn eval_expr(&mut self, expr: &Expr, scope: &Scope) -> SemaResult<Type> {
        let ty = match &expr.kind {
            ExprKind::IntLiteral(_) => Type::Int,
            ExprKind::RealLiteral(_) => Type::Real,
            ExprKind::BoolLiteral(_) => Type::Bool,

            ExprKind::List(items) => self.eval_list(items, scope)?,

            ExprKind::Identifier(name) => scope.lookup(name, expr.span)?,

            ExprKind::Unary { op, operand } => {
                self.metrics.count_operators(1);
                let ty = self.eval_expr(operand, scope)?;
                match op {
                    UnaryOp::Neg => {
                        if ty.is_defined() && !ty.is_numeric() {
                            return Err(SemanticError::expression(operand.span));
                        }
                        ty
                    }
                    UnaryOp::Not => {
                        if ty.is_defined() && ty != Type::Bool {
                            return Err(SemanticError::expression(operand.span));
                        }
                        Type::Bool
                    }
                }
            }

            ExprKind::Additive(chain) => self.eval_arithmetic(chain, scope)?,
            ExprKind::Multiplicative(chain) => self.eval_arithmetic(chain, scope)?,

            ExprKind::Logical(chain) => {
                self.metrics.count_operators(chain.links());
                for operand in chain.operands() {
                    if self.eval_expr(operand, scope)? != Type::Bool {
                        return Err(SemanticError::expression(operand.span));
                    }
                }
                Type::Bool
            }

            ExprKind::Compare { left, rhs } => match rhs {
                None => self.eval_expr(left, scope)?,
                Some((op, right)) => self.eval_comparison(*op, left, right, scope)?,
            },

            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                self.metrics.count_conditional();
                self.check_condition(condition, scope)?;

                let then_ty = self.eval_expr(then_expr, scope)?;
                let else_ty = self.eval_expr(else_expr, scope)?;
                if then_ty.conflicts_with(else_ty) {
                    return Err(SemanticError::expression(expr.span));
                }
                if then_ty.is_defined() { then_ty } else { else_ty }
            }
        };

        trace!(span = ?expr.span, %expr, %ty, "expression typed");
        Ok(ty)
    }

    /// Condition of an `if`, a loop or a ternary: must be exactly `Bool`
    pub(super) fn check_condition(&mut self, condition: &Expr, scope: &Scope) -> SemaResult<()> {
        match self.eval_expr(condition, scope)? {
            Type::Bool => Ok(()),
            _ => Err(SemanticError::condition(condition.span)),
        }
    }

    /// Elements must agree with the first one; the element type is not kept
    fn eval_list(&mut self, items: &[Expr], scope: &Scope) -> SemaResult<Type> {
        let Some((first, rest)) = items.split_first() else {
            return Ok(Type::List);
        };

        let reference = self.eval_expr(first, scope)?;
        for item in rest {
            if self.eval_expr(item, scope)?.conflicts_with(reference) {
                return Err(SemanticError::expression(item.span));
            }
        }
        Ok(Type::List)
    }

    /// `+ -` and `* / %` chains.
    ///
    /// The first operand fixes the result type. An `Undefined` first operand
    /// makes the whole chain `Undefined` without checking the others.
    fn eval_arithmetic<Op>(&mut self, chain: &Chain<Op>, scope: &Scope) -> SemaResult<Type> {
        self.metrics.count_operators(chain.links());

        let first = self.eval_expr(&chain.first, scope)?;
        if first.is_defined() && !first.is_numeric() {
            return Err(SemanticError::expression(chain.first.span));
        }

        for (_, operand) in &chain.rest {
            if self.eval_expr(operand, scope)?.conflicts_with(first) {
                return Err(SemanticError::expression(operand.span));
            }
        }
        Ok(first)
    }

    fn eval_comparison(
        &mut self,
        op: CompareOp,
        left: &Expr,
        right: &Expr,
        scope: &Scope,
    ) -> SemaResult<Type> {
        let left_ty = self.eval_expr(left, scope)?;
        let right_ty = self.eval_expr(right, scope)?;
        let span = left.span.merge(right.span);

        if !left_ty.is_defined() || !right_ty.is_defined() {
            return Err(SemanticError::expression(span));
        }
        self.metrics.count_operators(1);

        if op.is_ordering() && !(left_ty.is_numeric() && right_ty.is_numeric()) {
            return Err(SemanticError::expression(span));
        }
        if op.is_equality() && left_ty != right_ty {
            return Err(SemanticError::expression(span));
        }
        Ok(Type::Bool)
    }
}
