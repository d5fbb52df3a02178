//! Error types for the meetings client.

use thiserror::Error;

/// Errors that can occur when talking to a meetings server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a failure envelope
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No token available, or the server rejected the one sent
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// The message a UI should show: the server's own wording when it sent one
    pub fn message(&self) -> String {
        match self {
            Self::ServerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthRequired => Some(401),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
