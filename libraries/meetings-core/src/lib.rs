//! Meetings Core
//!
//! Platform-agnostic types, traits, and error handling for meeting records.
//!
//! This crate provides the building blocks shared by the storage layer, the
//! HTTP server, and the client cache store.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Meeting`, `StoredMeeting`, `User`, `UserRef`, payloads
//! - **Filters**: `ListParams` resolved into a `MeetingFilter` per caller
//! - **Core Traits**: `StorageContext`
//! - **Error Handling**: Unified `MeetingsError` and `Result` types
//! - **Envelope**: the `{ status, message, data?, error? }` response wrapper
//!
//! # Example
//!
//! ```rust
//! use meetings_core::types::{MeetingId, NewMeeting, UserId};
//! use chrono::Utc;
//!
//! let owner = UserId::generate();
//! let stored = NewMeeting::new("Quarterly review")
//!     .into_stored(MeetingId::generate(), &owner, Utc::now());
//! assert!(stored.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use envelope::Envelope;
pub use error::{MeetingsError, Result};
pub use storage::StorageContext;

pub use types::{
    DateRange, DeleteManyResult, ListParams, Meeting, MeetingFilter, MeetingId, MeetingStatus,
    NewMeeting, StoredMeeting, UpdateMeeting, User, UserId, UserRef, UserRole, Visibility,
};
