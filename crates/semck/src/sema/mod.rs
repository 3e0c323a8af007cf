//! Semantic analysis module
//!
//! Single-pass static checking of a [`Program`](crate::frontend::ast::Program):
//! declaration before use, type compatibility and block scoping. The first
//! violation aborts the run.

mod types;
mod scope;
mod metrics;
mod expr;
mod analyzer;

pub use types::Type;
pub use scope::{Scope, Symbol};
pub use metrics::Metrics;
pub use analyzer::SemanticAnalyzer;

use crate::common::SemaResult;
use crate::frontend::ast::Program;

/// Check `program` and return its metrics, or the first semantic error
pub fn analyze(program: &Program) -> SemaResult<Metrics> {
    SemanticAnalyzer::new().analyze(program)
}
