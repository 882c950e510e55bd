//! Error types for quotesync-core

use thiserror::Error;

/// Result type alias using quotesync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quotesync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty quote text/category
    #[error("Invalid quote: {0}")]
    Validation(String),

    /// Persisted state could not be written or erased
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Malformed persisted or imported JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
