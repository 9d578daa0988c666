//! Toy AST - Core types for the abstract syntax tree
//!
//! This crate defines all AST node types, spans for source locations,
//! the keyword table, and the diagnostic type every phase reports with.

mod span;
mod expr;
mod stmt;
mod keywords;
mod diagnostic;

pub use span::*;
pub use expr::*;
pub use stmt::*;
pub use keywords::*;
pub use diagnostic::*;

use serde::{Deserialize, Serialize};

/// A complete toy program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    /// Total number of statements, nested ones included
    pub fn statement_count(&self) -> usize {
        self.body.iter().map(Stmt::count).sum()
    }

    /// Deepest block nesting in the program (0 when there are no blocks)
    pub fn max_depth(&self) -> usize {
        self.body.iter().map(Stmt::block_depth).max().unwrap_or(0)
    }
}
