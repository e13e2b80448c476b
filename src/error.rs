//! Error types for the blink decoding library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed landmark frame in a replay source
    #[error("Landmark error on line {line}: {reason}")]
    LandmarkError {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// Command transport failed
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
