//! Error types for the core library.

use thiserror::Error;

/// Error raised when a source file cannot be parsed at all.
///
/// Note that unsupported annotation shapes are not errors: they degrade to
/// the empty alternative list by design. A `ParseError` means the file is
/// structurally broken (e.g. an unterminated docstring or signature).
#[derive(Debug, Error)]
pub enum ParseError {
    /// A definition could not be read past.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A docstring opened but never closed.
    #[error("unterminated docstring starting at line {line}")]
    UnterminatedDocstring { line: usize },

    /// A function signature never reached its closing `:`.
    #[error("unterminated signature for '{name}' starting at line {line}")]
    UnterminatedSignature { name: String, line: usize },
}

impl ParseError {
    /// Create a syntax error with location information.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Error raised when a named output dialect cannot be resolved.
#[derive(Debug, Error)]
pub enum DialectError {
    /// The registry has no dialect under the requested name.
    #[error("unknown dialect '{name}' (expected one of: {available})")]
    Unknown { name: String, available: String },
}
