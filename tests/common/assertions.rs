use toy::ast::{Diagnostic, DiagnosticKind, Program};
use toy::{compile, Compiled};

/// Assert that compilation succeeds without warnings
pub fn assert_compiles_clean(source: &str) -> Compiled {
    let compiled = compile(source)
        .unwrap_or_else(|failure| panic!("Expected success, got {:?}", failure.diagnostics));
    assert!(
        compiled.warnings.is_empty(),
        "Unexpected warnings: {:?}",
        compiled.warnings
    );
    compiled
}

/// Assert that compilation fails and return its diagnostics
pub fn assert_compile_fails(source: &str) -> Vec<Diagnostic> {
    match compile(source) {
        Ok(compiled) => panic!("Expected failure, got:\n{}", compiled.code),
        Err(failure) => failure.diagnostics,
    }
}

/// Assert a diagnostic of `kind` sits at `line:column`
pub fn assert_diagnostic_at(diagnostics: &[Diagnostic], kind: DiagnosticKind, line: u32, column: u32) {
    assert!(
        diagnostics
            .iter()
            .any(|d| d.kind == kind && d.span.line == line && d.span.column == column),
        "Expected {:?} at {}:{}, got {:?}",
        kind,
        line,
        column,
        diagnostics
    );
}

/// Parse source that must be free of errors
pub fn parse_clean(source: &str) -> Program {
    let output = toy::parser::parse_source(source).expect("lex failed");
    assert!(output.is_ok(), "parse failed: {:?}", output.errors);
    output.program
}

/// Deepest nesting of braces in generated JavaScript
pub fn max_brace_depth(js: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in js.chars() {
        match c {
            '{' => {
                depth += 1;
                max = max.max(depth);
            }
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Read generated JavaScript back as toy source by undoing the keyword mapping.
///
/// Only sound for programs whose strings hold none of the mapped spellings.
pub fn js_back_to_toy(js: &str) -> String {
    js.replace("console.log(", "log(")
        .replace("let ", "dec ")
        .replace("function ", "func ")
        .replace("switch(", "look(")
        .replace("case ", "when ")
        .replace("continue;", "keep;")
}
