//! Error types for protfetch

use thiserror::Error;

/// Result type alias for protfetch operations
pub type Result<T> = std::result::Result<T, ProtfetchError>;

/// Main error type shared across the workspace
#[derive(Error, Debug)]
pub enum ProtfetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid accession: '{0}'")]
    InvalidAccession(String),
}
