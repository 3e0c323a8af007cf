//! Source frontend: lexing and parsing into the AST consumed by [`crate::sema`]

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::common::CheckResult;

/// Parse a whole source text into a [`Program`]
pub fn parse(source: &str) -> CheckResult<Program> {
    Parser::new(source)?.parse()
}
