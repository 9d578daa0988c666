//! End-to-end integration tests for the toy compiler
//!
//! These tests drive the full pipeline from toy source to JavaScript.

mod common;

use common::assertions::*;
use common::fixtures::*;
use std::fs;
use std::io;
use std::process::Command;
use toy::ast::{DiagnosticKind, Severity};
use toy::{compile, compile_with, CodegenOptions, CompileOptions};

// === Scenarios ===

#[test]
fn e2e_declaration_and_log() {
    let compiled = assert_compiles_clean("dec x = 5;\nlog(x);");
    assert_eq!(compiled.code, "let x = 5;\nconsole.log(x);");
}

#[test]
fn e2e_function() {
    let compiled = assert_compiles_clean("func add(a, b) { return a + b; }");
    assert_eq!(compiled.code, "function add(a, b) { return a + b; }");
}

#[test]
fn e2e_switch() {
    let compiled = assert_compiles_clean("dec x = 1;\nlook(x) { when 1: log(\"one\"); break; }");
    assert_eq!(
        compiled.code,
        "let x = 1;\nswitch(x) { case 1: console.log(\"one\"); break; }"
    );
}

#[test]
fn e2e_reserved_word_as_variable() {
    let diagnostics = assert_compile_fails("dec log = 3;");
    assert_eq!(diagnostics.len(), 1);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 1, 5);
}

#[test]
fn e2e_javascript_reserved_names_rejected() {
    let diagnostics = assert_compile_fails("dec let = 5;\nconst switch = 1;\nfunc new() { }");
    assert_eq!(diagnostics.len(), 3, "{:?}", diagnostics);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 1, 5);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 2, 7);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 3, 6);
}

#[test]
fn e2e_malformed_number_is_lex_error() {
    let diagnostics = assert_compile_fails("dec big = 1.5n;");
    assert_eq!(diagnostics.len(), 1);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::Lex, 1, 11);
    assert_eq!(diagnostics[0].code, "E-LEX-004");
}

#[test]
fn e2e_unterminated_function_body() {
    let diagnostics = assert_compile_fails("func f() { ");
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::Parse);
    assert!(d.message.contains("end of input"), "{}", d.message);
    assert!(d.message.contains("'}'"), "{}", d.message);
}

#[test]
fn e2e_keyword_misuse_at_keyword_token() {
    let diagnostics = assert_compile_fails("dec dec = 5;");
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 1, 5);

    let diagnostics = assert_compile_fails("dec y = 1;\nif(3);");
    assert_diagnostic_at(&diagnostics, DiagnosticKind::ReservedWord, 2, 1);
}

// === Error reporting ===

#[test]
fn e2e_every_error_is_reported_in_order() {
    let diagnostics = assert_compile_fails("dec log = 1;\ndec x = 1;\ndec x = 2;\nfunc f(when) { }");
    let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::ReservedWord,
            DiagnosticKind::DuplicateDeclaration,
            DiagnosticKind::ReservedWord,
        ]
    );
    assert_eq!(diagnostics[1].related[0].span.line, 2);
}

#[test]
fn e2e_lex_error_position() {
    let diagnostics = assert_compile_fails("dec x = 1;\ndec y = x ? 2;");
    assert_eq!(diagnostics.len(), 1);
    assert_diagnostic_at(&diagnostics, DiagnosticKind::Lex, 2, 11);
}

#[test]
fn e2e_parse_errors_recover() {
    let diagnostics = assert_compile_fails("dec a = ;\nlog(1;\ndec b = 2;");
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Parse));
    assert_eq!(diagnostics[0].span.line, 1);
    assert_eq!(diagnostics[1].span.line, 2);
}

#[test]
fn e2e_warning_keeps_output() {
    let compiled = compile("log(value);").unwrap();
    assert_eq!(compiled.code, "console.log(value);");
    assert_eq!(compiled.warnings.len(), 1);
    assert_eq!(compiled.warnings[0].severity, Severity::Warning);
}

// === Demos ===

#[test]
fn e2e_all_demos_compile() {
    let demos = discover_demos();
    assert!(!demos.is_empty(), "No .toy demos found! Check demos/ directory.");

    for path in &demos {
        let source = fs::read_to_string(path).unwrap();
        let compiled = compile(&source)
            .unwrap_or_else(|f| panic!("{} failed: {:?}", path.display(), f.diagnostics));
        assert!(
            compiled.warnings.is_empty(),
            "{} warned: {:?}",
            path.display(),
            compiled.warnings
        );
    }
}

#[test]
fn e2e_functions_demo_output() {
    let compiled = assert_compiles_clean(&load_demo("functions"));
    assert_eq!(
        compiled.code,
        "function add(a, b) { return a + b; }\n\
         function square(n) { return n * n; }\n\
         const total = add(square(3), square(4));\n\
         console.log(\"total\", total);"
    );
}

#[test]
fn e2e_fizzbuzz_demo_output() {
    let compiled = assert_compiles_clean(&load_demo("fizzbuzz"));
    assert_eq!(
        compiled.code,
        "for(let i = 1; i <= 15; i++) { \
         if(i % 15 === 0) { console.log(\"FizzBuzz\"); } \
         else if(i % 3 === 0) { console.log(\"Fizz\"); } \
         else if(i % 5 === 0) { console.log(\"Buzz\"); } \
         else { console.log(i); } }"
    );
}

#[test]
fn e2e_structure_is_preserved() {
    for path in discover_demos() {
        let source = fs::read_to_string(&path).unwrap();
        let program = parse_clean(&source);

        let inline = compile(&source).unwrap().code;
        assert_eq!(inline.lines().count(), program.body.len(), "{}", path.display());
        assert_eq!(max_brace_depth(&inline), program.max_depth(), "{}", path.display());
        assert_same_structure(&program, &inline, &path.display().to_string());

        let options = CompileOptions {
            codegen: CodegenOptions::indented(4),
            ..CompileOptions::default()
        };
        let indented = compile_with(&source, &options).unwrap().code;
        assert_eq!(max_brace_depth(&indented), program.max_depth(), "{}", path.display());
        assert_same_structure(&program, &indented, &path.display().to_string());
    }
}

/// The output holds as many statements as the source, nested the same way
fn assert_same_structure(program: &toy::ast::Program, js: &str, context: &str) {
    let reparsed = parse_clean(&js_back_to_toy(js));
    assert_eq!(reparsed.statement_count(), program.statement_count(), "{context}:\n{js}");
    assert_eq!(reparsed.max_depth(), program.max_depth(), "{context}:\n{js}");
}

#[test]
fn e2e_nested_statements_are_all_emitted() {
    let source = "func f(n) {\n    dec a = n;\n    if (a) { log(a); a += 1; } else { return; }\n    while (a) { keep; }\n}";
    let program = parse_clean(source);
    assert_eq!(program.body.len(), 1);
    assert_eq!(program.statement_count(), 8);

    let compiled = assert_compiles_clean(source);
    assert_eq!(compiled.code.lines().count(), 1);
    assert_same_structure(&program, &compiled.code, source);
}

#[test]
fn e2e_output_passes_javascript_syntax_check() {
    let dir = tempfile::tempdir().unwrap();
    for path in discover_demos() {
        let code = compile(&fs::read_to_string(&path).unwrap()).unwrap().code;
        let out = dir.path().join(path.with_extension("js").file_name().unwrap());
        fs::write(&out, code).unwrap();

        match Command::new("node").arg("--check").arg(&out).output() {
            Ok(output) => assert!(
                output.status.success(),
                "{}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr)
            ),
            // No JavaScript runtime on this machine
            Err(e) if e.kind() == io::ErrorKind::NotFound => return,
            Err(e) => panic!("cannot run node: {e}"),
        }
    }
}

#[test]
fn e2e_compile_is_deterministic() {
    for path in discover_demos() {
        let source = fs::read_to_string(&path).unwrap();
        assert_eq!(compile(&source), compile(&source), "{}", path.display());
    }
}

#[test]
fn e2e_no_toy_keywords_in_output() {
    for path in discover_demos() {
        let code = compile(&fs::read_to_string(&path).unwrap()).unwrap().code;
        for keyword in ["dec ", "func ", "look", "when ", "keep;"] {
            assert!(!code.contains(keyword), "{} left in {}", keyword, path.display());
        }
    }
}

#[test]
fn e2e_ast_serializes() {
    let program = parse_clean(&load_demo("switch"));
    let json = serde_json::to_value(&program).unwrap();
    assert!(json["body"].is_array());
    assert_eq!(json["body"].as_array().unwrap().len(), program.body.len());
}
