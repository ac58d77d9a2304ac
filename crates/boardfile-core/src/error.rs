//! Error types for boardfile-core

use thiserror::Error;

/// Result type alias using boardfile-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in boardfile-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required host collaborators were not supplied
    #[error("Attachment manager setup failed: {0}")]
    Setup(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
