//! Error types for the decompound library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`DecompoundError`] enum.
//!
//! # Examples
//!
//! ```
//! use decompound::error::{DecompoundError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(DecompoundError::invalid_argument("buffer size must be >= 2"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for decompound operations.
///
/// Construction-time validation failures are reported as
/// [`DecompoundError::InvalidArgument`]. Failures of the character source are
/// passed through unchanged as [`DecompoundError::Io`].
#[derive(Error, Debug)]
pub enum DecompoundError {
    /// I/O errors raised by a character source or while loading resources
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An argument failed validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An index fell outside the addressable range of a buffer
    #[error("Index out of range: {index} (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dictionary loading errors
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with DecompoundError.
pub type Result<T> = std::result::Result<T, DecompoundError>;

impl DecompoundError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DecompoundError::InvalidArgument(msg.into())
    }

    /// Create a new index out of range error.
    pub fn index_out_of_range(index: usize, limit: usize) -> Self {
        DecompoundError::IndexOutOfRange { index, limit }
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        DecompoundError::Analysis(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        DecompoundError::Dictionary(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DecompoundError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DecompoundError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = DecompoundError::invalid_argument("capacity must be >= 2");
        assert_eq!(error.to_string(), "Invalid argument: capacity must be >= 2");

        let error = DecompoundError::index_out_of_range(7, 5);
        assert_eq!(error.to_string(), "Index out of range: 7 (limit 5)");

        let error = DecompoundError::dictionary("empty word list");
        assert_eq!(error.to_string(), "Dictionary error: empty word list");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::UnexpectedEof, "reader closed");
        let error = DecompoundError::from(io_error);

        match error {
            DecompoundError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof),
            _ => panic!("Expected IO error variant"),
        }
    }
}
