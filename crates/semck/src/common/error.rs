//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;

/// A static semantic violation. The first one found aborts the analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Variable {name} was not declared")]
    UndeclaredVariable { name: String, span: Span },

    #[error("Identifier {name} has multiple declarations")]
    MultipleDeclaration { name: String, span: Span },

    #[error("Invalid type in condition")]
    InvalidTypeInCondition { span: Span },

    #[error("Invalid type in expression")]
    InvalidTypeInExpression { span: Span },

    #[error("Invalid type in assignation of Identifier {name}")]
    InvalidAssignationType { name: String, span: Span },
}

impl SemanticError {
    pub fn undeclared(name: impl Into<String>, span: Span) -> Self {
        Self::UndeclaredVariable {
            name: name.into(),
            span,
        }
    }

    pub fn multiple_declaration(name: impl Into<String>, span: Span) -> Self {
        Self::MultipleDeclaration {
            name: name.into(),
            span,
        }
    }

    pub fn condition(span: Span) -> Self {
        Self::InvalidTypeInCondition { span }
    }

    pub fn expression(span: Span) -> Self {
        Self::InvalidTypeInExpression { span }
    }

    pub fn assignation(name: impl Into<String>, span: Span) -> Self {
        Self::InvalidAssignationType {
            name: name.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UndeclaredVariable { span, .. }
            | Self::MultipleDeclaration { span, .. }
            | Self::InvalidTypeInCondition { span }
            | Self::InvalidTypeInExpression { span }
            | Self::InvalidAssignationType { span, .. } => *span,
        }
    }
}

pub type SemaResult<T> = Result<T, SemanticError>;

/// Any failure of a check run, from reading the file to the semantic pass
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the diagnostic for `error` without emitting it
    pub fn diagnostic(file_id: usize, error: &CheckError) -> Diagnostic<usize> {
        match error {
            CheckError::Lexer { message, span } => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CheckError::Parser { message, span } => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CheckError::Semantic(err) => {
                let span = err.span();
                Diagnostic::error()
                    .with_message(err.to_string())
                    .with_labels(vec![Label::primary(file_id, span.start..span.end)])
            }

            CheckError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {err}"))
            }
        }
    }

    pub fn report_error(&self, file_id: usize, error: &CheckError) {
        let diagnostic = Self::diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_messages() {
        let span = Span::new(0, 1);
        assert_eq!(
            SemanticError::undeclared("x", span).to_string(),
            "Variable x was not declared"
        );
        assert_eq!(
            SemanticError::multiple_declaration("a", span).to_string(),
            "Identifier a has multiple declarations"
        );
        assert_eq!(SemanticError::condition(span).to_string(), "Invalid type in condition");
        assert_eq!(SemanticError::expression(span).to_string(), "Invalid type in expression");
        assert_eq!(
            SemanticError::assignation("a", span).to_string(),
            "Invalid type in assignation of Identifier a"
        );
    }

    #[test]
    fn test_semantic_is_transparent_in_check_error() {
        let err: CheckError = SemanticError::condition(Span::new(3, 4)).into();
        assert_eq!(err.to_string(), "Invalid type in condition");
        assert!(matches!(err, CheckError::Semantic(ref e) if e.span() == Span::new(3, 4)));
    }
}
