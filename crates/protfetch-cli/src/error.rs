//! Error types for the protfetch CLI
//!
//! Messages are user-facing; each variant says what to check next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and the service URL.")]
    Http(#[from] reqwest::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your flags or PROTFETCH_* environment variables.")]
    Config(String),

    /// The interactive prompt was cancelled or could not be shown
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Domain-level error from the common crate
    #[error(transparent)]
    Common(#[from] protfetch_common::ProtfetchError),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
