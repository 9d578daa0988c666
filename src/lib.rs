//! Toy - a compiler from the toy language to JavaScript
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use toy_ast as ast;
pub use toy_codegen as codegen;
pub use toy_compiler as compiler;
pub use toy_lexer as lexer;
pub use toy_parser as parser;
pub use toy_validator as validator;

pub use toy_codegen::{CodegenOptions, Layout};
pub use toy_compiler::{compile, compile_with, CompileFailure, CompileOptions, Compiled};
