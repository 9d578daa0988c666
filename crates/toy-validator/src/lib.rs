//! Toy Validator
//!
//! Checks a parsed program before code generation: reserved words used as
//! names, duplicate declarations within a scope, and reads of identifiers
//! that are never declared.

mod reserved;
mod scope;
mod symbols;

pub use reserved::ReservedWordChecker;
pub use scope::{ScopeChecker, KNOWN_GLOBALS};
pub use symbols::*;

use thiserror::Error;
use toy_ast::{Diagnostic, DiagnosticKind, Program, Span};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("reserved word '{name}' cannot be used as {role}")]
    ReservedWord {
        name: String,
        role: NameRole,
        span: Span,
    },

    #[error("duplicate declaration of '{name}'")]
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("'{name}' is not declared")]
    UndeclaredIdentifier { name: String, span: Span },
}

/// Where a name appears in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Variable,
    Constant,
    Function,
    Parameter,
    Callee,
    AssignmentTarget,
    Reference,
}

impl std::fmt::Display for NameRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NameRole::Variable => "a variable name",
            NameRole::Constant => "a constant name",
            NameRole::Function => "a function name",
            NameRole::Parameter => "a parameter name",
            NameRole::Callee => "a function call target",
            NameRole::AssignmentTarget => "an assignment target",
            NameRole::Reference => "a value",
        };
        f.write_str(s)
    }
}

impl ValidationError {
    pub fn span(&self) -> Span {
        match self {
            ValidationError::ReservedWord { span, .. } => *span,
            ValidationError::DuplicateDeclaration { span, .. } => *span,
            ValidationError::UndeclaredIdentifier { span, .. } => *span,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::ReservedWord { .. } => "E-RESERVED-001",
            ValidationError::DuplicateDeclaration { .. } => "E-SCOPE-001",
            ValidationError::UndeclaredIdentifier { .. } => "W-SCOPE-002",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = self.to_string();
        match self {
            ValidationError::ReservedWord { span, .. } => {
                Diagnostic::error(DiagnosticKind::ReservedWord, self.code(), message, *span)
            }
            ValidationError::DuplicateDeclaration { span, previous, .. } => Diagnostic::error(
                DiagnosticKind::DuplicateDeclaration,
                self.code(),
                message,
                *span,
            )
            .with_related(*previous, "first declared here"),
            ValidationError::UndeclaredIdentifier { span, .. } => Diagnostic::warning(
                DiagnosticKind::UndeclaredIdentifier,
                self.code(),
                message,
                *span,
            ),
        }
    }
}

/// Validator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Warn about identifiers that resolve to no declaration
    pub check_undeclared: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_undeclared: true,
        }
    }
}

/// Validate a program with default options
pub fn validate(program: &Program) -> Vec<Diagnostic> {
    validate_with(program, &ValidatorOptions::default())
}

/// Validate a program, returning diagnostics ordered by source position
pub fn validate_with(program: &Program, options: &ValidatorOptions) -> Vec<Diagnostic> {
    let mut errors = ReservedWordChecker::new().check_program(program);
    errors.extend(ScopeChecker::new(options.check_undeclared).check_program(program));

    let mut diagnostics: Vec<Diagnostic> = errors.iter().map(ValidationError::to_diagnostic).collect();
    diagnostics.sort_by_key(|d| d.span.start);
    diagnostics
}
