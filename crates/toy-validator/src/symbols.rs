//! Symbol table for name resolution

use std::collections::HashMap;
use toy_ast::Span;

/// Scoped symbol table. The outermost scope is the program.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub scope_depth: usize,
    pub span: Span,
}

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
    Parameter,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
        };
        f.write_str(s)
    }
}

/// A scope in the symbol table
#[derive(Debug, Default)]
struct Scope {
    symbols: HashMap<String, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Current nesting depth; the program scope is 0
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Define a symbol in the innermost scope.
    ///
    /// Returns the earlier symbol if the name is already taken in this scope.
    pub fn define(&mut self, name: &str, kind: SymbolKind, span: Span) -> Result<(), Symbol> {
        let scope_depth = self.depth();
        let scope = &mut self.scopes[scope_depth];

        if let Some(existing) = scope.symbols.get(name) {
            return Err(existing.clone());
        }

        scope.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
                scope_depth,
                span,
            },
        );
        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        // Search from innermost scope outward
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(name))
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Exit the current scope. The program scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}
