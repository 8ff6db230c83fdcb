//! Error types for the codec layer.

use thiserror::Error;

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding handles and integers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Source material is wider than a handle allows. Oversized input must
    /// fail, never truncate.
    #[error("invalid handle size: {size} bytes exceeds the 8 byte maximum")]
    InvalidSize { size: usize },

    /// Malformed hex or out-of-range integer input
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
}
