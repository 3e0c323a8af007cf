//! semck - static semantic checker for a small imperative language
//!
//! The language has `int`, `float`, `bool` and homogeneous `list` values,
//! declarations, assignment, `if`/`else`, `while`, `do ... while`, ternaries
//! and the usual arithmetic, relational and logical operators.
//!
//! ## Architecture
//!
//! - **Frontend** (`frontend/`): lexing and parsing into an AST
//! - **Sema** (`sema/`): type domain, scope tables, the expression evaluator
//!   and the statement checker
//! - **Driver** (`driver/`): the check pipeline
//! - **Common** (`common/`): spans, errors, diagnostics
//!
//! A run either completes with a [`Metrics`] report or stops at the first
//! [`SemanticError`].

pub mod common;
pub mod frontend;
pub mod sema;
pub mod driver;

// Re-exports for convenience
pub use common::{CheckError, CheckResult, DiagnosticReporter, SemaResult, SemanticError, Span};
pub use driver::{CheckConfig, Pipeline};
pub use sema::{analyze, Metrics, Scope, SemanticAnalyzer, Type};

/// Check a source text with the default configuration
pub fn check_source(source: &str) -> CheckResult<Metrics> {
    Pipeline::new().check_source(source)
}
