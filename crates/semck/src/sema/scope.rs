//! Symbol table and scope management

use crate::common::{SemaResult, SemanticError, Span};
use super::Type;
use std::collections::HashMap;

/// A declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    /// Where the name was introduced
    pub span: Span,
    /// Nesting level of the scope that declared it
    pub depth: usize,
}

/// Bindings visible in one lexical scope.
///
/// Nested blocks work on a full copy taken at block entry ([`Scope::enter_block`]).
/// Nothing flows back: declarations made in the copy vanish with it, and the
/// enclosing scope is exactly as it was before the block.
///
/// Inherited names count as present: redeclaring one in a branch or loop body
/// is a duplicate. Only a shadowing copy ([`Scope::enter_shadowing_block`])
/// lets a block rebind a name it inherited.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    depth: usize,
    shadowing: bool,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`. Fails if it is already present in this table.
    pub fn declare(&mut self, name: &str, ty: Type, span: Span) -> SemaResult<()> {
        if let Some(existing) = self.symbols.get(name) {
            if !self.shadowing || existing.depth == self.depth {
                return Err(SemanticError::multiple_declaration(name, span));
            }
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty,
                span,
                depth: self.depth,
            },
        );
        Ok(())
    }

    /// Type of `name`; `span` locates the use for the error
    pub fn lookup(&self, name: &str, span: Span) -> SemaResult<Type> {
        self.symbols
            .get(name)
            .map(|sym| sym.ty)
            .ok_or_else(|| SemanticError::undeclared(name, span))
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Independent copy of the current bindings for a branch or loop body
    pub fn enter_block(&self) -> Scope {
        Scope {
            symbols: self.symbols.clone(),
            depth: self.depth + 1,
            shadowing: false,
        }
    }

    /// Independent copy for a bare `{ ... }` block, whose declarations may
    /// shadow inherited names
    pub fn enter_shadowing_block(&self) -> Scope {
        Scope {
            shadowing: true,
            ..self.enter_block()
        }
    }

    /// Nesting level, 0 for the program scope
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of names visible in this scope
    pub fn binding_count(&self) -> usize {
        self.symbols.len()
    }
}
