//! Integration tests for reserved-word and scope validation

use toy_ast::{Diagnostic, DiagnosticKind, Severity};
use toy_parser::parse_source;
use toy_validator::{validate, validate_with, ValidatorOptions};

/// Helper: parse (expecting success) and validate with default options
fn validate_source(source: &str) -> Vec<Diagnostic> {
    let output = parse_source(source).expect("lex failed");
    assert!(output.is_ok(), "parse failed: {:?}", output.errors);
    validate(&output.program)
}

fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind).collect()
}

// === Reserved Words ===

#[test]
fn test_keyword_as_variable_name() {
    let diagnostics = validate_source("dec log = 3;");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    let d = &diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::ReservedWord);
    assert_eq!(d.code, "E-RESERVED-001");
    assert_eq!((d.span.line, d.span.column), (1, 5));
    assert!(d.message.contains("'log'"));
}

#[test]
fn test_keyword_named_after_its_own_declaration() {
    let diagnostics = validate_source("dec dec = 5;");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::ReservedWord]);
    assert_eq!(diagnostics[0].span.column, 5);
}

#[test]
fn test_keyword_called_as_function() {
    let diagnostics = validate_source("if(3);");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::ReservedWord]);
    assert_eq!((diagnostics[0].span.line, diagnostics[0].span.column), (1, 1));
    assert!(diagnostics[0].message.contains("call"));
}

#[test]
fn test_keyword_as_function_and_parameter() {
    let diagnostics = validate_source("func look(when) { }");
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message.contains("function name"));
    assert!(diagnostics[1].message.contains("parameter name"));
    assert_eq!(diagnostics[1].span.column, 11);
}

#[test]
fn test_keyword_as_assignment_target() {
    let diagnostics = validate_source("log = 3;");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::ReservedWord]);
    assert!(diagnostics[0].message.contains("assignment target"));
}

#[test]
fn test_keyword_inside_string_or_name_is_fine() {
    let diagnostics = validate_source("dec logger = \"dec log = 3;\";\nlog(logger);");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_builtin_log_is_not_reserved_misuse() {
    let diagnostics = validate_source("dec x = 1;\nlog(x, \"done\");");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_javascript_reserved_words_as_names() {
    for (source, column) in [
        ("dec let = 5;", 5),
        ("const switch = 1;", 7),
        ("func new() { }", 6),
        ("dec default = 2;", 5),
        ("func f(class) { }", 8),
    ] {
        let diagnostics = validate_source(source);
        assert_eq!(kinds(&diagnostics), [DiagnosticKind::ReservedWord], "{source}");
        assert_eq!(diagnostics[0].code, "E-RESERVED-001");
        assert_eq!(diagnostics[0].span.column, column, "{source}");
    }
}

#[test]
fn test_javascript_reserved_words_as_call_and_target() {
    let diagnostics = validate_source("typeof(1);\nvar = 2;");
    assert_eq!(
        kinds(&diagnostics),
        [DiagnosticKind::ReservedWord, DiagnosticKind::ReservedWord]
    );
    assert!(diagnostics[0].message.contains("call"));
    assert!(diagnostics[1].message.contains("assignment target"));
}

#[test]
fn test_javascript_reserved_word_read_as_value() {
    let diagnostics = validate_source("log(class);");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::ReservedWord]);
    assert_eq!(diagnostics[0].span.column, 5);

    // Value words stay readable
    let diagnostics = validate_source("dec o = this;\nlog(o, true, false, null);");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_javascript_word_as_property_is_fine() {
    let diagnostics = validate_source("dec o = [];\nlog(o.new, o.default);");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

// === Duplicate Declarations ===

#[test]
fn test_duplicate_in_program_scope() {
    let diagnostics = validate_source("dec x = 1;\ndec x = 2;");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::DuplicateDeclaration]);
    let d = &diagnostics[0];
    assert_eq!(d.code, "E-SCOPE-001");
    assert_eq!((d.span.line, d.span.column), (2, 5));
    assert_eq!(d.related.len(), 1);
    assert_eq!(d.related[0].label, "first declared here");
    assert_eq!((d.related[0].span.line, d.related[0].span.column), (1, 5));
}

#[test]
fn test_function_and_variable_clash() {
    let diagnostics = validate_source("func f() { }\nconst f = 1;");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::DuplicateDeclaration]);
}

#[test]
fn test_shadowing_in_block_is_allowed() {
    let diagnostics = validate_source("dec x = 1;\nif (x) { dec x = 2; log(x); }");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_parameter_shares_scope_with_body() {
    let diagnostics = validate_source("func f(a) { dec a = 1; }");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::DuplicateDeclaration]);
}

#[test]
fn test_duplicate_parameters() {
    let diagnostics = validate_source("func f(a, a) { return a; }");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::DuplicateDeclaration]);
    assert_eq!(diagnostics[0].span.column, 11);
}

#[test]
fn test_switch_body_is_one_scope() {
    let diagnostics = validate_source(
        "dec x = 0;\nlook(x) { when 1: dec y = 1; break; when 2: dec y = 2; break; }",
    );
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::DuplicateDeclaration]);
}

#[test]
fn test_for_header_scope_ends_with_loop() {
    let diagnostics = validate_source(
        "for (dec i = 0; i < 3; i++) { log(i); }\nfor (dec i = 0; i < 3; i++) { }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_declarations_are_hoisted() {
    let diagnostics = validate_source("log(f());\nfunc f() { return 1; }");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

// === Undeclared Identifiers ===

#[test]
fn test_undeclared_identifier_is_warning() {
    let diagnostics = validate_source("log(y);");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::UndeclaredIdentifier]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code, "W-SCOPE-002");
    assert_eq!(diagnostics[0].span.column, 5);
}

#[test]
fn test_undeclared_reported_once_per_name() {
    let diagnostics = validate_source("log(z);\nlog(z + 1);");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_undeclared_check_can_be_disabled() {
    let output = parse_source("log(y);").unwrap();
    let options = ValidatorOptions {
        check_undeclared: false,
    };
    assert!(validate_with(&output.program, &options).is_empty());
}

#[test]
fn test_known_globals_and_properties() {
    let diagnostics = validate_source(
        "dec o = [1, 2];\nlog(Math.max(o.length, 2), undefined, true, null);",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_out_of_scope_read() {
    let diagnostics = validate_source("if (1) { dec inner = 2; }\nlog(inner);");
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::UndeclaredIdentifier]);
    assert_eq!(diagnostics[0].span.line, 2);
}

// === Ordering ===

#[test]
fn test_diagnostics_in_source_order() {
    let diagnostics = validate_source("dec x = 1;\ndec x = 3;\ndec log = 2;");
    assert_eq!(
        kinds(&diagnostics),
        [
            DiagnosticKind::DuplicateDeclaration,
            DiagnosticKind::ReservedWord
        ]
    );
}
