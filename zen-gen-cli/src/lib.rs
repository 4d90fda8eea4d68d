//! # zen-gen-cli
//!
//! CLI library for the `zen-gen` binary: file IO at the document boundary
//! and the CLI error taxonomy. The conversion engine itself lives in the
//! `zen-gen` crate.
//!
//! - [`error`] - Error types and handling
//! - [`io`] - Source reading, document loading/saving, module writing

pub mod error;
pub mod io;

// Re-export main types for convenience
pub use error::{CliError, CliResult};
