//! Toy Lexer - Tokenization using logos
//!
//! Turns source text into a lazy stream of tokens. Keywords get their own
//! token kinds so the parser never has to compare identifier text. Every
//! token carries a span with its line and column.

mod token;

pub use token::*;

use logos::Logos;
use thiserror::Error;
use toy_ast::{LineIndex, Span};

/// A token with its source text and span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn column(&self) -> u32 {
        self.span.column
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }
}

/// Input the lexer could not turn into a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} '{lexeme}'")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub lexeme: String,
    pub span: Span,
}

impl LexError {
    pub fn span(&self) -> Span {
        self.span
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexErrorKind::InvalidCharacter => "E-LEX-001",
            LexErrorKind::UnterminatedString => "E-LEX-002",
            LexErrorKind::UnterminatedComment => "E-LEX-003",
            LexErrorKind::InvalidNumber => "E-LEX-004",
        }
    }

    pub fn to_diagnostic(&self) -> toy_ast::Diagnostic {
        let message = match self.kind {
            LexErrorKind::InvalidCharacter => format!("invalid character '{}'", self.lexeme),
            LexErrorKind::InvalidNumber => format!("invalid number literal '{}'", self.lexeme),
            kind => kind.to_string(),
        };
        toy_ast::Diagnostic::error(toy_ast::DiagnosticKind::Lex, self.code(), message, self.span)
    }
}

/// Lazy token stream over a source string.
///
/// Yields tokens in order and finishes with exactly one `Eof` token. Lexing
/// continues past invalid input, so every error in the source is reported.
/// Cloning forks the stream at its current position; call [`lex`] again to
/// start over.
#[derive(Clone)]
pub struct TokenStream<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    index: LineIndex<'src>,
    finished: bool,
}

/// Start lexing `source`
pub fn lex(source: &str) -> TokenStream<'_> {
    TokenStream {
        inner: TokenKind::lexer(source),
        index: LineIndex::new(source),
        finished: false,
    }
}

impl<'src> Iterator for TokenStream<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(result) => {
                let range = self.inner.span();
                let span = self.index.span(range.start, range.end);
                let lexeme = self.inner.slice();
                Some(match result {
                    Ok(kind) => Ok(Token { kind, lexeme, span }),
                    Err(kind) => Err(LexError {
                        kind,
                        lexeme: lexeme.to_string(),
                        span,
                    }),
                })
            }
            None => {
                self.finished = true;
                let end = self.inner.source().len();
                Some(Ok(Token {
                    kind: TokenKind::Eof,
                    lexeme: "",
                    span: self.index.span(end, end),
                }))
            }
        }
    }
}

/// Tokenize a source string into a vector of tokens ending in `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in lex(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
