/// Core error types for meetings
use thiserror::Error;

/// Result type alias using `MeetingsError`
pub type Result<T> = std::result::Result<T, MeetingsError>;

/// Core error type shared by storage and the service layer
#[derive(Error, Debug)]
pub enum MeetingsError {
    /// Malformed identifier, batch, or filter parameter
    #[error("{0}")]
    InvalidInput(String),

    /// No matching non-deleted record
    #[error("{0}")]
    NotFound(String),

    /// Caller identity could not be resolved
    #[error("{0}")]
    Unauthorized(String),

    /// A record failed field-level validation before being written
    #[error("Meeting validation failed: {0}")]
    Validation(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MeetingsError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MeetingsError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
