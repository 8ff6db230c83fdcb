//! Unified error type for the console.
//!
//! Codec and token failures carry their own structured error types and are
//! wrapped here so the REPL boundary can treat every failure uniformly:
//! print a diagnostic plus contextual help and keep looping, or terminate
//! under the fatal batch-exit condition.

use std::io;

use thiserror::Error;

use crate::codec::error::CodecError;
use crate::token::TokenError;

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Errors surfaced at the REPL boundary
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No command matches the leading token
    #[error("unknown command: {token}")]
    Resolution { token: String },

    /// A resolved command failed while executing
    #[error("{0}")]
    Execution(String),

    /// Handle or integer codec failure
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Failure reported by the module/session collaborator
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Errors related to configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors related to IO operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for ConsoleError {
    fn from(error: serde_json::Error) -> Self {
        ConsoleError::Config(error.to_string())
    }
}
