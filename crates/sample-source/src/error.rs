//! Sample Source Errors

use thiserror::Error;

/// Errors while retrieving feed history
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Request for feed '{feed}' failed: {message}")]
    Request { feed: String, message: String },

    /// Store answered with a non-success status
    #[error("Feed '{feed}' returned HTTP {status}")]
    Status { feed: String, status: u16 },

    /// Response body was not the expected JSON
    #[error("Feed '{feed}' returned malformed data: {message}")]
    Decode { feed: String, message: String },

    /// Feed does not exist in the store
    #[error("Unknown feed: {0}")]
    UnknownFeed(String),

    /// Source misconfigured
    #[error("Invalid source configuration: {0}")]
    Config(String),
}
