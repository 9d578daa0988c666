//! Toy CLI - Command line interface for the toy compiler

mod commands;
mod error;
mod repl;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use toy_codegen::CodegenOptions;
use toy_compiler::CompileOptions;
use tracing_subscriber::EnvFilter;

use commands::{cmd_ast, cmd_build, cmd_check, cmd_tokens};
use repl::cmd_repl;

#[derive(Parser)]
#[command(name = "toy")]
#[command(about = "Compiler from the toy language to JavaScript", version, long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that validate
#[derive(Args, Debug, Clone, Copy)]
struct ValidationArgs {
    /// Treat warnings as errors
    #[arg(long)]
    warnings_as_errors: bool,
    /// Do not warn about undeclared identifiers
    #[arg(long)]
    no_undeclared: bool,
}

impl ValidationArgs {
    fn compile_options(self, indent: Option<usize>) -> CompileOptions {
        CompileOptions {
            codegen: indent.map(CodegenOptions::indented).unwrap_or_default(),
            check_undeclared: !self.no_undeclared,
            warnings_as_errors: self.warnings_as_errors,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a file to JavaScript
    Build {
        /// Input file
        file: PathBuf,
        /// Output file (defaults to the input with a .js extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run the output after writing it
        #[arg(long)]
        run: bool,
        /// JavaScript runtime used by --run
        #[arg(long, env = "TOY_JS_RUNTIME", default_value = "node")]
        runtime: String,
        /// Also print the generated JavaScript
        #[arg(long)]
        print: bool,
        /// Indent blocks by this many spaces instead of printing them inline
        #[arg(long, value_name = "WIDTH")]
        indent: Option<usize>,
        #[command(flatten)]
        validation: ValidationArgs,
    },
    /// Compile a file and run it
    Run {
        /// Input file
        file: PathBuf,
        /// JavaScript runtime
        #[arg(long, env = "TOY_JS_RUNTIME", default_value = "node")]
        runtime: String,
        #[command(flatten)]
        validation: ValidationArgs,
    },
    /// Validate files or directories of .toy files
    Check {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        validation: ValidationArgs,
    },
    /// Print the token stream of a file
    Tokens {
        /// Input file
        file: PathBuf,
    },
    /// Parse a file and output the AST as JSON
    Ast {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Interactive REPL
    Repl,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TOY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            file,
            output,
            run,
            runtime,
            print,
            indent,
            validation,
        } => cmd_build(
            &file,
            output.as_deref(),
            &validation.compile_options(indent),
            print,
            run.then_some(runtime.as_str()),
        ),
        Commands::Run {
            file,
            runtime,
            validation,
        } => cmd_build(
            &file,
            None,
            &validation.compile_options(None),
            false,
            Some(runtime.as_str()),
        ),
        Commands::Check { paths, validation } => {
            cmd_check(&paths, &validation.compile_options(None))
        }
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Ast { file, pretty } => cmd_ast(&file, pretty),
        Commands::Repl => cmd_repl(),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "toy",
            "build",
            "main.toy",
            "--indent",
            "2",
            "--no-undeclared",
            "--warnings-as-errors",
        ])
        .unwrap();
        let Commands::Build {
            indent, validation, ..
        } = cli.command
        else {
            panic!("expected build");
        };
        let options = validation.compile_options(indent);
        assert_eq!(options.codegen, CodegenOptions::indented(2));
        assert!(!options.check_undeclared);
        assert!(options.warnings_as_errors);
    }
}
