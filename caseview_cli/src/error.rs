use std::path::PathBuf;

use caseview_codegen::{ConfigError, SourceSpan};
use thiserror::Error;

/// Failures that stop the CLI from processing an input.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: failed to read: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: failed to write: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: error: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CliError {
    /// A source file that is not valid Rust.
    pub fn parse(path: impl Into<PathBuf>, error: &syn::Error) -> Self {
        let location = SourceSpan::new("<file>", error.span());
        Self::Parse {
            path: path.into(),
            line: location.line,
            column: location.column,
            message: error.to_string(),
        }
    }
}
