//! Storage trait for meeting records and the user directory

use crate::error::Result;
use crate::types::{
    MeetingFilter, MeetingId, StoredMeeting, UpdateMeeting, User, UserId, UserRef,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage context providing access to persistence operations
///
/// Every read and mutation here ignores records in the `deleted` state.
/// Records come back with bare user references; expansion is a separate pass
/// over [`StorageContext::resolve_users`].
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Meetings
    // ========================================================================

    /// Persist a new record
    async fn insert_meeting(&self, meeting: &StoredMeeting) -> Result<()>;

    /// Get an active meeting by ID
    async fn get_meeting(&self, id: &MeetingId) -> Result<Option<StoredMeeting>>;

    /// Active meetings matching the filter, most recently touched first
    async fn list_meetings(&self, filter: &MeetingFilter) -> Result<Vec<StoredMeeting>>;

    /// Merge changes into an active meeting, validating the merged record
    ///
    /// Returns `None` when no active meeting has this ID.
    async fn update_meeting(
        &self,
        id: &MeetingId,
        changes: UpdateMeeting,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredMeeting>>;

    /// Move an active meeting to the deleted state
    ///
    /// Returns the post-mutation record, or `None` when no active meeting has
    /// this ID.
    async fn soft_delete_meeting(
        &self,
        id: &MeetingId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredMeeting>>;

    /// Move every matching active meeting to the deleted state atomically
    ///
    /// Returns the IDs that actually changed.
    async fn soft_delete_meetings(
        &self,
        ids: &[MeetingId],
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingId>>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Get a directory user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Display projections for the given IDs; unknown IDs are skipped
    async fn resolve_users(&self, ids: &[UserId]) -> Result<Vec<UserRef>>;
}
