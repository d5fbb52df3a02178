//! Meetings Client
//!
//! HTTP client for the meetings API plus a client-side cache store that
//! mirrors server responses for UI consumption.
//!
//! # Features
//!
//! - **Client**: list, get, create, update, delete, and bulk delete over HTTP
//! - **Store**: reducer-driven cache that reconciles mutations by id
//!
//! # Example
//!
//! ```ignore
//! use meetings_client::{ClientConfig, MeetingStore, MeetingsClient};
//! use meetings_core::{ListParams, NewMeeting};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::with_token("https://crm.example.com", "eyJ...");
//!     let store = MeetingStore::new(MeetingsClient::new(config)?);
//!
//!     store.fetch_all(&ListParams::default()).await?;
//!     store.add(&NewMeeting::new("Quarterly review")).await?;
//!
//!     println!("{} meetings cached", store.snapshot().await.meetings.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod store;
mod types;

// Re-export main types
pub use client::MeetingsClient;
pub use error::{ClientError, Result};
pub use store::{MeetingAction, MeetingState, MeetingStore};
pub use types::ClientConfig;
