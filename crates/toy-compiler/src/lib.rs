//! Toy Compiler - the lex, parse, validate, generate pipeline
//!
//! [`compile`] is the single entry point the CLI and tests go through. It
//! keeps no state between calls.

use thiserror::Error;
use toy_ast::{has_errors, Diagnostic, Severity};
use toy_codegen::{generate_with, CodegenOptions};
use toy_lexer::{tokenize, LexError};
use toy_parser::{parse, ParseError};
use toy_validator::{validate_with, ValidatorOptions};
use tracing::debug;

/// Pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub codegen: CodegenOptions,
    /// Warn about reads of identifiers that are never declared
    pub check_undeclared: bool,
    /// Treat every warning as an error
    pub warnings_as_errors: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            codegen: CodegenOptions::default(),
            check_undeclared: true,
            warnings_as_errors: false,
        }
    }
}

/// A successful compilation
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    /// Generated JavaScript
    pub code: String,
    /// Diagnostics that did not block generation
    pub warnings: Vec<Diagnostic>,
}

/// A compilation stopped by at least one error
#[derive(Debug, Clone, PartialEq, Error)]
#[error("compilation failed with {} error(s)", self.error_count())]
pub struct CompileFailure {
    /// Every diagnostic collected, warnings included, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileFailure {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Compile toy source to JavaScript with default options
pub fn compile(source: &str) -> Result<Compiled, CompileFailure> {
    compile_with(source, &CompileOptions::default())
}

/// Compile toy source to JavaScript
pub fn compile_with(source: &str, options: &CompileOptions) -> Result<Compiled, CompileFailure> {
    let tokens = tokenize(source).map_err(|errors| {
        debug!(errors = errors.len(), "lexing failed");
        CompileFailure {
            diagnostics: errors.iter().map(LexError::to_diagnostic).collect(),
        }
    })?;
    debug!(tokens = tokens.len(), "lexed source");

    let output = parse(tokens);
    debug!(
        statements = output.program.statement_count(),
        errors = output.errors.len(),
        aborted = output.aborted(),
        "parsed program"
    );

    let mut diagnostics: Vec<Diagnostic> =
        output.errors.iter().map(ParseError::to_diagnostic).collect();

    // A tree cut short by a fatal error is not worth validating
    if !output.aborted() {
        let validator_options = ValidatorOptions {
            check_undeclared: options.check_undeclared,
        };
        let found = validate_with(&output.program, &validator_options);
        debug!(diagnostics = found.len(), "validated program");
        diagnostics.extend(found);
    }

    if options.warnings_as_errors {
        diagnostics = diagnostics
            .into_iter()
            .map(|d| d.with_severity(Severity::Error))
            .collect();
    }
    diagnostics.sort_by_key(|d| d.span.start);

    if has_errors(&diagnostics) {
        return Err(CompileFailure { diagnostics });
    }

    let code = generate_with(&output.program, &options.codegen);
    debug!(bytes = code.len(), warnings = diagnostics.len(), "generated javascript");

    Ok(Compiled {
        code,
        warnings: diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toy_ast::DiagnosticKind;

    #[test]
    fn test_compiles_declaration_and_log() {
        let compiled = compile("dec x = 5;\nlog(x);").unwrap();
        assert_eq!(compiled.code, "let x = 5;\nconsole.log(x);");
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn test_lex_errors_stop_the_pipeline() {
        let failure = compile("dec x = 5 # 1;\ndec log = 2;").unwrap_err();
        assert_eq!(failure.diagnostics.len(), 1);
        assert_eq!(failure.diagnostics[0].kind, DiagnosticKind::Lex);
        assert_eq!(failure.diagnostics[0].code, "E-LEX-001");
    }

    #[test]
    fn test_reserved_word_blocks_generation() {
        let failure = compile("dec log = 3;").unwrap_err();
        assert_eq!(failure.error_count(), 1);
        let d = &failure.diagnostics[0];
        assert_eq!(d.kind, DiagnosticKind::ReservedWord);
        assert_eq!((d.span.line, d.span.column), (1, 5));
    }

    #[test]
    fn test_recovered_parse_still_validated() {
        let failure = compile("dec x = ;\ndec log = 1;\nlog(undeclared);").unwrap_err();
        let kinds: Vec<_> = failure.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                DiagnosticKind::Parse,
                DiagnosticKind::ReservedWord,
                DiagnosticKind::UndeclaredIdentifier
            ]
        );
    }

    #[test]
    fn test_warnings_kept_after_parse_error() {
        let failure = compile("dec x = ;\nlog(missing);").unwrap_err();
        let kinds: Vec<_> = failure.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::Parse, DiagnosticKind::UndeclaredIdentifier]);
        assert_eq!(failure.diagnostics[1].severity, Severity::Warning);
        assert_eq!(failure.diagnostics[1].span.line, 2);
        assert_eq!(failure.error_count(), 1);
    }

    #[test]
    fn test_deep_nesting_fails_cleanly() {
        let source = format!("log({}1{});", "[".repeat(20_000), "]".repeat(20_000));
        let failure = compile(&source).unwrap_err();
        assert_eq!(failure.diagnostics.len(), 1);
        assert_eq!(failure.diagnostics[0].code, "E-PARSE-006");
    }

    #[test]
    fn test_fatal_parse_error_skips_validation() {
        let failure = compile("dec log = 1;\nfunc f() { ").unwrap_err();
        assert_eq!(failure.diagnostics.len(), 1);
        assert_eq!(failure.diagnostics[0].kind, DiagnosticKind::Parse);
        assert!(failure.diagnostics[0].message.contains("end of input"));
    }

    #[test]
    fn test_warnings_do_not_block() {
        let compiled = compile("log(missing);").unwrap();
        assert_eq!(compiled.code, "console.log(missing);");
        assert_eq!(compiled.warnings.len(), 1);
        assert_eq!(compiled.warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_warnings_as_errors() {
        let options = CompileOptions {
            warnings_as_errors: true,
            ..CompileOptions::default()
        };
        let failure = compile_with("log(missing);", &options).unwrap_err();
        assert_eq!(failure.error_count(), 1);
        assert!(failure.to_string().contains("1 error"));
    }

    #[test]
    fn test_indented_output() {
        let options = CompileOptions {
            codegen: CodegenOptions::indented(2),
            ..CompileOptions::default()
        };
        let compiled = compile_with("while (1) { break; }", &options).unwrap();
        assert_eq!(compiled.code, "while(1) {\n  break;\n}");
    }
}
