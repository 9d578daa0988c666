//! Subcommand implementations
//!
//! Each command returns `Ok(false)` when the input had errors, and `Err` only
//! for failures outside the compiler (files, runtime, terminal).

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use toy_compiler::{compile_with, CompileOptions};
use toy_lexer::lex;
use toy_parser::parse_source;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::CliError;
use crate::report::report_all;

pub fn read_source(file: &Path) -> Result<String, CliError> {
    fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })
}

/// Where the JavaScript for `file` is written: `-o` if given, else `<file>.js`
pub fn output_path(file: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => file.with_extension("js"),
    }
}

/// Whether two paths name the same file, following links when both exist
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Compile one file and write its JavaScript.
///
/// Nothing is written when compilation fails or when the output path is the
/// input itself. With a runtime the written file is executed afterwards.
pub fn cmd_build(
    file: &Path,
    output: Option<&Path>,
    options: &CompileOptions,
    print: bool,
    runtime: Option<&str>,
) -> Result<bool, CliError> {
    let source = read_source(file)?;
    let name = file.display().to_string();

    let out_path = output_path(file, output);
    if same_file(file, &out_path) {
        return Err(CliError::OutputIsInput { path: out_path });
    }

    let compiled = match compile_with(&source, options) {
        Ok(compiled) => compiled,
        Err(failure) => {
            report_all(&failure.diagnostics, &name, &source)?;
            eprintln!("✗ {} - {}", name, failure);
            return Ok(false);
        }
    };
    report_all(&compiled.warnings, &name, &source)?;

    let mut contents = compiled.code.clone();
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(&out_path, contents).map_err(|source| CliError::Write {
        path: out_path.clone(),
        source,
    })?;
    info!(input = %name, output = %out_path.display(), "wrote javascript");
    println!("Compiled {} -> {}", name, out_path.display());

    if print {
        println!("{}", compiled.code);
    }

    match runtime {
        Some(runtime) => run_js(runtime, &out_path),
        None => Ok(true),
    }
}

/// Execute a JavaScript file, forwarding its output.
///
/// A runtime that is not installed is only a note: the file was still built.
pub fn run_js(runtime: &str, path: &Path) -> Result<bool, CliError> {
    info!(runtime, path = %path.display(), "running javascript");
    match Command::new(runtime).arg(path).output() {
        Ok(output) => {
            io::stdout().write_all(&output.stdout)?;
            io::stderr().write_all(&output.stderr)?;
            Ok(output.status.success())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(runtime, "javascript runtime not found");
            eprintln!(
                "note: '{}' was not found; {} was written but not run",
                runtime,
                path.display()
            );
            Ok(true)
        }
        Err(source) => Err(CliError::Runtime {
            runtime: runtime.to_string(),
            source,
        }),
    }
}

/// Expand directories into the `.toy` files below them, in name order
pub fn collect_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("toy"))
                    .map(|e| e.into_path()),
            );
        } else {
            files.push(path.clone());
        }
    }
    files
}

pub fn cmd_check(paths: &[PathBuf], options: &CompileOptions) -> Result<bool, CliError> {
    let files = collect_sources(paths);
    let mut failed = 0;

    for file in &files {
        let name = file.display().to_string();
        let source = match read_source(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("✗ {}", e);
                failed += 1;
                continue;
            }
        };

        match compile_with(&source, options) {
            Ok(compiled) => {
                report_all(&compiled.warnings, &name, &source)?;
                if compiled.warnings.is_empty() {
                    println!("✓ {}", name);
                } else {
                    println!("✓ {} - {} warning(s)", name, compiled.warnings.len());
                }
            }
            Err(failure) => {
                report_all(&failure.diagnostics, &name, &source)?;
                eprintln!("✗ {} - {} error(s)", name, failure.error_count());
                failed += 1;
            }
        }
    }

    println!("{} file(s) checked, {} failed", files.len(), failed);
    Ok(failed == 0)
}

/// Print the token stream as a table
pub fn cmd_tokens(file: &Path) -> Result<bool, CliError> {
    let source = read_source(file)?;
    let name = file.display().to_string();
    let mut ok = true;

    for result in lex(&source) {
        match result {
            Ok(token) => println!(
                "{:>4}:{:<4} {:<9} {:<12} {}",
                token.line(),
                token.column(),
                format!("{:?}", token.category()),
                format!("{:?}", token.kind),
                token.lexeme
            ),
            Err(e) => {
                report_all(&[e.to_diagnostic()], &name, &source)?;
                ok = false;
            }
        }
    }

    Ok(ok)
}

/// Print the AST as JSON
pub fn cmd_ast(file: &Path, pretty: bool) -> Result<bool, CliError> {
    let source = read_source(file)?;
    let name = file.display().to_string();

    let output = match parse_source(&source) {
        Ok(output) => output,
        Err(errors) => {
            let diagnostics: Vec<_> = errors.iter().map(|e| e.to_diagnostic()).collect();
            report_all(&diagnostics, &name, &source)?;
            return Ok(false);
        }
    };

    if !output.errors.is_empty() {
        let diagnostics: Vec<_> = output.errors.iter().map(|e| e.to_diagnostic()).collect();
        report_all(&diagnostics, &name, &source)?;
        return Ok(false);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&output.program)?
    } else {
        serde_json::to_string(&output.program)?
    };
    println!("{}", json);
    Ok(true)
}
