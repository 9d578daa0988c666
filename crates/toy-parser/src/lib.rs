//! Toy Parser - Recursive descent parser
//!
//! Parses a token sequence into a `Program` AST.
//! Key parsing choices:
//! - Errors are collected per statement; parsing resumes at the next
//!   statement boundary
//! - Running out of input inside a block, or nesting past the limits, is a
//!   hard failure
//! - Keywords in name positions are kept in the tree for the validator

mod error;
mod parser;

pub use error::*;
pub use parser::*;

use toy_lexer::{tokenize, LexError, Token};

/// Parse a token sequence into a Program AST plus recoverable errors
pub fn parse(tokens: Vec<Token<'_>>) -> ParseOutput {
    Parser::new(tokens).parse_program()
}

/// Lex and parse a source string
pub fn parse_source(source: &str) -> Result<ParseOutput, Vec<LexError>> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens))
}
