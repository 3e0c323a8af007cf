//! Semantic analyzer - statement checking and scope handling

use tracing::{debug, info};

use crate::common::{SemaResult, SemanticError};
use crate::frontend::ast::*;
use super::{Metrics, Scope, Type};

/// Semantic analyzer for one check run.
///
/// Scopes are passed down the traversal explicitly; the analyzer itself only
/// owns the counters.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    pub(super) metrics: Metrics,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a whole program. Metrics are only produced if every node checks.
    pub fn analyze(mut self, program: &Program) -> SemaResult<Metrics> {
        let mut scope = Scope::new();
        for stmt in &program.stmts {
            self.analyze_stmt(stmt, &mut scope)?;
        }

        info!(metrics = %self.metrics, "semantic analysis complete");
        Ok(self.metrics)
    }

    /// Counters accumulated so far
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn analyze_stmt(&mut self, stmt: &Stmt, scope: &mut Scope) -> SemaResult<()> {
        match &stmt.kind {
            StmtKind::Declare(decl) => self.analyze_declaration(decl, scope),

            StmtKind::Assign {
                target,
                target_span,
                value,
            } => {
                let declared = scope.lookup(target, *target_span)?;
                let value_ty = self.eval_expr(value, scope)?;
                if value_ty.is_defined() && value_ty != declared {
                    return Err(SemanticError::assignation(target, stmt.span));
                }
                Ok(())
            }

            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.metrics.count_conditional();
                self.check_condition(condition, scope)?;
                self.analyze_block(then_block, &mut scope.enter_block())?;
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block, &mut scope.enter_block())?;
                }
                Ok(())
            }

            StmtKind::While { condition, body } => {
                self.metrics.count_loop();
                self.check_condition(condition, scope)?;
                self.analyze_block(body, &mut scope.enter_block())
            }

            StmtKind::DoWhile { body, condition } => {
                self.metrics.count_loop();
                let mut local = scope.enter_block();
                self.analyze_block(body, &mut local)?;
                // the condition still sees what the body declared
                self.check_condition(condition, &local)
            }

            StmtKind::Block(block) => self.analyze_block(block, &mut scope.enter_shadowing_block()),

            StmtKind::Expr(expr) => {
                self.eval_expr(expr, scope)?;
                Ok(())
            }
        }
    }

    fn analyze_declaration(&mut self, decl: &Declaration, scope: &mut Scope) -> SemaResult<()> {
        let declared = Type::from_type_name(&decl.type_name);
        scope.declare(&decl.name, declared, decl.name_span)?;
        self.metrics.count_declaration();
        debug!(name = %decl.name, ty = %declared, depth = scope.depth(), "declared");

        // the new binding is already visible to its own initializer
        if let Some(init) = &decl.init {
            let init_ty = self.eval_expr(init, scope)?;
            if init_ty.is_defined() && init_ty != declared {
                return Err(SemanticError::assignation(&decl.name, decl.span));
            }
        }
        Ok(())
    }

    /// Run a block against `local`, a copy of the enclosing scope
    fn analyze_block(&mut self, block: &Block, local: &mut Scope) -> SemaResult<()> {
        debug!(depth = local.depth(), bindings = local.binding_count(), "enter block");

        for stmt in &block.stmts {
            self.analyze_stmt(stmt, local)?;
        }

        debug!(depth = local.depth(), "leave block");
        Ok(())
    }
}
