//! Parser error types

use toy_ast::{Diagnostic, DiagnosticKind, Span};
use toy_lexer::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    /// Hard failure: the input ended inside a block
    #[error("unterminated block: expected '}}', found end of input")]
    UnterminatedBlock { span: Span, opened: Span },

    #[error("invalid case label: expected a number or string literal, found {found}")]
    InvalidSwitchLabel { found: String, span: Span },

    #[error("missing initializer in const declaration of '{name}'")]
    MissingInitializer { name: String, span: Span },

    /// Hard failure: blocks or expressions nest past the parser's limit
    #[error("nesting too deep: more than {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::UnterminatedBlock { span, .. } => *span,
            ParseError::InvalidSwitchLabel { span, .. } => *span,
            ParseError::MissingInitializer { span, .. } => *span,
            ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// What the parser was looking for
    pub fn expected(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { expected, .. } => expected,
            ParseError::UnexpectedEof { expected, .. } => expected,
            ParseError::UnterminatedBlock { .. } => "'}'",
            ParseError::InvalidSwitchLabel { .. } => "literal",
            ParseError::MissingInitializer { .. } => "'='",
            ParseError::NestingTooDeep { .. } => "shallower nesting",
        }
    }

    /// What the parser found instead
    pub fn found(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { found, .. } => found,
            ParseError::UnexpectedEof { .. } | ParseError::UnterminatedBlock { .. } => {
                TokenKind::Eof.describe()
            }
            ParseError::InvalidSwitchLabel { found, .. } => found,
            ParseError::MissingInitializer { .. } => "';'",
            ParseError::NestingTooDeep { .. } => "deeper nesting",
        }
    }

    /// Whether parsing must stop instead of recovering at the next statement
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::UnterminatedBlock { .. } | ParseError::NestingTooDeep { .. }
        )
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "E-PARSE-001",
            ParseError::UnexpectedEof { .. } => "E-PARSE-002",
            ParseError::UnterminatedBlock { .. } => "E-PARSE-003",
            ParseError::InvalidSwitchLabel { .. } => "E-PARSE-004",
            ParseError::MissingInitializer { .. } => "E-PARSE-005",
            ParseError::NestingTooDeep { .. } => "E-PARSE-006",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic =
            Diagnostic::error(DiagnosticKind::Parse, self.code(), self.to_string(), self.span());
        match self {
            ParseError::UnterminatedBlock { opened, .. } => {
                diagnostic.with_related(*opened, "block opened here")
            }
            _ => diagnostic,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected = expected.into();
        if found == TokenKind::Eof {
            ParseError::UnexpectedEof { expected, span }
        } else {
            ParseError::UnexpectedToken {
                expected,
                found: found.describe().to_string(),
                span,
            }
        }
    }
}
