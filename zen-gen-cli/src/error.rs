//! Error types for the CLI.
//!
//! Every failure aborts before any output file is written; the binary maps
//! these errors to a colored message on stderr and a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;
use zen_gen::{DialectError, ParseError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required input file does not exist.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A required input path points at a directory.
    #[error("Source path is a directory, expected a file: {path}")]
    SourceIsDirectory { path: PathBuf },

    /// The interface document failed structural parsing.
    #[error("Malformed document {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// A source file could not be parsed.
    #[error("Failed to parse source: {0}")]
    Parse(#[from] ParseError),

    /// The requested output dialect is not registered.
    #[error("{0}")]
    Dialect(#[from] DialectError),

    /// Document serialization failed.
    #[error("Failed to serialize document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
