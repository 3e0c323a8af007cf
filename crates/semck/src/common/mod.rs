//! Common infrastructure shared by the frontend, the checker and the driver

mod error;
mod span;

pub use error::{CheckError, CheckResult, DiagnosticReporter, SemaResult, SemanticError};
pub use span::Span;
