/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meetings_core::{Envelope, MeetingsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or invalid credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A meeting operation failed; `context` is the message shown to callers
    /// when the failure is not the caller's fault
    #[error("{context}: {source}")]
    Meetings {
        context: &'static str,
        #[source]
        source: MeetingsError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl ServerError {
    /// Attach the operation's failure message to a domain error
    pub fn meetings(context: &'static str) -> impl FnOnce(MeetingsError) -> Self {
        move |source| Self::Meetings { context, source }
    }

    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            ServerError::Meetings { context, source } => match source {
                MeetingsError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                MeetingsError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
                MeetingsError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
                other => {
                    tracing::error!(error = %other, "{}", context);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        (*context).to_string(),
                        Some(other.to_string()),
                    )
                }
            },
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                    None,
                )
            }
            ServerError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message, error) = self.parts();
        let body: Envelope<()> = Envelope::failure(status.as_u16(), message, error);

        (status, Json(body)).into_response()
    }
}
