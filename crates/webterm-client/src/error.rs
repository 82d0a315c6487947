//! Error types for the publishing client.

use thiserror::Error;

/// Errors that can occur while registering or publishing sessions.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A session with this name is already registered.
    #[error("session '{0}' is already registered")]
    DuplicateName(String),

    /// A session with this slug is already registered.
    #[error("slug '{0}' is already in use")]
    DuplicateSlug(String),

    /// Connecting or talking to the server failed; the client retries.
    #[error("publish failed: {0}")]
    Publish(String),

    /// The server refused the client; retrying will not help.
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// The connection request itself is invalid (bad URL or header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Whether the publish loop should reconnect after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Publish(_))
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
