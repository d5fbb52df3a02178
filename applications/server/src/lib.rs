//! Meetings Server Library
//!
//! HTTP resource for meeting records: JWT-authenticated create, list, view,
//! update, and soft delete over a `SQLite` store.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, meetings::MeetingService};
pub use state::AppState;
