//! Interactive REPL: every entry is compiled and its JavaScript printed

use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use toy_codegen::{CodegenOptions, Layout};
use toy_compiler::{compile_with, CompileOptions};

use crate::commands::read_source;
use crate::error::CliError;
use crate::report::report_all;

/// One line of REPL input
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Quit,
    Help,
    Load(&'a str),
    Indent(usize),
    Inline,
    Source(&'a str),
    Empty,
    Unknown(&'a str),
}

impl<'a> ReplCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }
        if !trimmed.starts_with(':') {
            return ReplCommand::Source(trimmed);
        }

        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };
        match command {
            ":quit" | ":q" => ReplCommand::Quit,
            ":help" | ":h" => ReplCommand::Help,
            ":inline" => ReplCommand::Inline,
            ":load" if !arg.is_empty() => ReplCommand::Load(arg),
            ":indent" => match arg.parse() {
                Ok(width) if width > 0 => ReplCommand::Indent(width),
                _ => ReplCommand::Unknown(trimmed),
            },
            _ => ReplCommand::Unknown(trimmed),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :load <file>  - Compile a file and print its JavaScript");
    println!("  :indent <n>   - Indent blocks by n spaces");
    println!("  :inline       - Print blocks on one line (default)");
    println!("  :quit         - Exit REPL");
    println!("Anything else is compiled as toy source.");
}

fn compile_and_print(source: &str, name: &str, options: &CompileOptions) -> Result<(), CliError> {
    match compile_with(source, options) {
        Ok(compiled) => {
            report_all(&compiled.warnings, name, source)?;
            if !compiled.code.is_empty() {
                println!("{}", compiled.code);
            }
        }
        Err(failure) => report_all(&failure.diagnostics, name, source)?,
    }
    Ok(())
}

pub fn cmd_repl() -> Result<bool, CliError> {
    println!("toy REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut rl = DefaultEditor::new()?;
    // Entries are single lines, so undeclared warnings would fire on every reference
    let mut options = CompileOptions {
        check_undeclared: false,
        ..CompileOptions::default()
    };

    loop {
        let line = match rl.readline("toy> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let _ = rl.add_history_entry(line.as_str());

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Empty => {}
            ReplCommand::Inline => {
                options.codegen = CodegenOptions::default();
                println!("Layout: inline");
            }
            ReplCommand::Indent(width) => {
                options.codegen.layout = Layout::Indented { width };
                println!("Layout: indented by {}", width);
            }
            ReplCommand::Load(path) => match read_source(Path::new(path)) {
                Ok(source) => compile_and_print(&source, path, &options)?,
                Err(e) => eprintln!("Error: {}", e),
            },
            ReplCommand::Source(source) => compile_and_print(source, "<repl>", &options)?,
            ReplCommand::Unknown(_) => println!("Unknown command. Type :help for help."),
        }
    }

    println!("Goodbye!");
    Ok(true)
}
