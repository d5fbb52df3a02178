/// Meeting query/command service
///
/// Owns the rules that sit between HTTP and storage: identifier checks,
/// visibility, validation before writes, and expansion of user references on
/// every record that leaves the service.
use chrono::{DateTime, Utc};
use meetings_core::types::referenced_users;
use meetings_core::{
    DeleteManyResult, ListParams, Meeting, MeetingFilter, MeetingId, MeetingsError, NewMeeting,
    Result, StorageContext, StoredMeeting, UpdateMeeting, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;

const INVALID_ID: &str = "Invalid meeting ID";
const NOT_FOUND: &str = "Meeting not found";

pub struct MeetingService {
    storage: Arc<dyn StorageContext>,
}

impl MeetingService {
    pub fn new(storage: Arc<dyn StorageContext>) -> Self {
        Self { storage }
    }

    /// Create a meeting owned by `createBy`, or by the caller when omitted
    pub async fn add(&self, caller: &UserId, payload: NewMeeting) -> Result<Meeting> {
        let meeting = payload.into_stored(MeetingId::generate(), caller, now());
        meeting.validate()?;

        self.storage.insert_meeting(&meeting).await?;
        tracing::info!(meeting_id = %meeting.id, caller = %caller, "Meeting added");

        let stored = self
            .storage
            .get_meeting(&meeting.id)
            .await?
            .ok_or_else(|| MeetingsError::Other("Meeting vanished after insert".to_string()))?;

        self.expand_one(stored).await
    }

    /// Active meetings visible to the caller, most recently touched first
    pub async fn list(&self, caller: &UserId, params: &ListParams) -> Result<Vec<Meeting>> {
        let user = self
            .storage
            .get_user(caller)
            .await?
            .ok_or_else(|| MeetingsError::Unauthorized("Unknown user".to_string()))?;

        let filter = MeetingFilter::resolve(&user, params)?;
        tracing::debug!(caller = %caller, ?filter, "Listing meetings");

        let meetings = self.storage.list_meetings(&filter).await?;
        self.expand(meetings).await
    }

    pub async fn view(&self, id: &str) -> Result<Meeting> {
        let id = parse_id(id)?;

        let meeting = self
            .storage
            .get_meeting(&id)
            .await?
            .ok_or_else(|| MeetingsError::not_found(NOT_FOUND))?;

        self.expand_one(meeting).await
    }

    /// Merge present fields into an active meeting
    pub async fn update(&self, id: &str, changes: UpdateMeeting) -> Result<Meeting> {
        let id = parse_id(id)?;

        let meeting = self
            .storage
            .update_meeting(&id, changes, now())
            .await?
            .ok_or_else(|| MeetingsError::not_found(NOT_FOUND))?;
        tracing::info!(meeting_id = %id, "Meeting updated");

        self.expand_one(meeting).await
    }

    /// Soft delete one meeting, returning it in its deleted state
    pub async fn delete_one(&self, id: &str) -> Result<Meeting> {
        let id = parse_id(id)?;

        let meeting = self
            .storage
            .soft_delete_meeting(&id, now())
            .await?
            .ok_or_else(|| MeetingsError::not_found(NOT_FOUND))?;
        tracing::info!(meeting_id = %id, "Meeting deleted");

        self.expand_one(meeting).await
    }

    /// Soft delete a batch atomically
    ///
    /// Every identifier is checked before anything is written, so one bad id
    /// rejects the whole batch.
    pub async fn delete_many(&self, raw_ids: &[String]) -> Result<DeleteManyResult> {
        if raw_ids.is_empty() {
            return Err(MeetingsError::invalid_input("Invalid or empty IDs array"));
        }

        let ids = raw_ids
            .iter()
            .map(|raw| MeetingId::parse(raw))
            .collect::<Result<Vec<_>>>()
            .map_err(|_| MeetingsError::invalid_input("Invalid meeting ID(s) in array"))?;

        let modified = self.storage.soft_delete_meetings(&ids, now()).await?;
        if modified.is_empty() {
            return Err(MeetingsError::not_found("No meetings found to delete"));
        }

        tracing::info!(requested = ids.len(), modified = modified.len(), "Meetings deleted");

        Ok(DeleteManyResult {
            modified_count: modified.len() as u64,
            ids: modified,
        })
    }

    async fn expand_one(&self, meeting: StoredMeeting) -> Result<Meeting> {
        let mut expanded = self.expand(vec![meeting]).await?;
        expanded
            .pop()
            .ok_or_else(|| MeetingsError::Other("Meeting lost during expansion".to_string()))
    }

    /// Replace bare user ids with display projections in one directory lookup
    async fn expand(&self, meetings: Vec<StoredMeeting>) -> Result<Vec<Meeting>> {
        let ids = referenced_users(&meetings);
        let directory: HashMap<_, _> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.storage
                .resolve_users(&ids)
                .await?
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect()
        };

        Ok(meetings
            .into_iter()
            .map(|meeting| meeting.hydrate(&directory))
            .collect())
    }
}

fn parse_id(raw: &str) -> Result<MeetingId> {
    MeetingId::parse(raw).map_err(|_| MeetingsError::invalid_input(INVALID_ID))
}

fn now() -> DateTime<Utc> {
    meetings_storage::now()
}
