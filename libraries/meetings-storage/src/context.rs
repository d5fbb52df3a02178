use crate::{meetings, users};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meetings_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the database answers
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Meetings
    async fn insert_meeting(&self, meeting: &StoredMeeting) -> Result<()> {
        meetings::create(&self.pool, meeting).await
    }

    async fn get_meeting(&self, id: &MeetingId) -> Result<Option<StoredMeeting>> {
        meetings::get_by_id(&self.pool, id).await
    }

    async fn list_meetings(&self, filter: &MeetingFilter) -> Result<Vec<StoredMeeting>> {
        meetings::list(&self.pool, filter).await
    }

    async fn update_meeting(
        &self,
        id: &MeetingId,
        changes: UpdateMeeting,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredMeeting>> {
        meetings::update(&self.pool, id, changes, now).await
    }

    async fn soft_delete_meeting(
        &self,
        id: &MeetingId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredMeeting>> {
        meetings::soft_delete(&self.pool, id, now).await
    }

    async fn soft_delete_meetings(
        &self,
        ids: &[MeetingId],
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingId>> {
        meetings::soft_delete_many(&self.pool, ids, now).await
    }

    // Users
    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn resolve_users(&self, ids: &[UserId]) -> Result<Vec<UserRef>> {
        Ok(users::resolve(&self.pool, ids).await?)
    }
}
