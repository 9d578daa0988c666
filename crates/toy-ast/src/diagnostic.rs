//! Diagnostics shared by every compiler phase
//!
//! Each phase keeps its own error enum; all of them convert into a
//! [`Diagnostic`] so the facade can report them together.

use serde::{Deserialize, Serialize};
use crate::{Position, Span};

/// A diagnostic with a position, a stable code, and optional related locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Error code (e.g., "E-RESERVED-001")
    pub code: String,
    pub message: String,
    /// Primary source span
    pub span: Span,
    /// Related source locations
    pub related: Vec<RelatedLocation>,
}

/// Which check produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Lex,
    Parse,
    ReservedWord,
    DuplicateDeclaration,
    UndeclaredIdentifier,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

/// A related source location with context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedLocation {
    pub span: Span,
    /// Label for the location (e.g., "first declared here")
    pub label: String,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(
        kind: DiagnosticKind,
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            span,
            related: Vec::new(),
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(
        kind: DiagnosticKind,
        code: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, code, message, span)
        }
    }

    /// Add a related location
    pub fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.related.push(RelatedLocation {
            span,
            label: label.into(),
        });
        self
    }

    /// Set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn position(&self) -> Position {
        self.span.position()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}[{}] at {}: {}",
            level,
            self.code,
            self.position(),
            self.message
        )
    }
}

/// Whether any diagnostic in the slice blocks code generation
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
