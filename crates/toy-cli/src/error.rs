//! CLI error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("refusing to overwrite the input {} with its output", path.display())]
    OutputIsInput { path: PathBuf },

    #[error("cannot run '{runtime}': {source}")]
    Runtime { runtime: String, source: io::Error },

    #[error("cannot serialize AST: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
