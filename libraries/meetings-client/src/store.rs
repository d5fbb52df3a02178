//! Client-side cache of meeting records.
//!
//! State changes only through [`MeetingState::apply`]. The async thunks on
//! [`MeetingStore`] call the server and then dispatch the matching action, so
//! the cached list tracks what the server reported without refetching. The
//! cache is eventually consistent; [`MeetingStore::fetch_all`] is the way back
//! to the server's truth.

use crate::client::MeetingsClient;
use crate::error::Result;
use meetings_core::{
    DeleteManyResult, ListParams, Meeting, MeetingId, NewMeeting, UpdateMeeting,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Snapshot of the cached collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingState {
    /// Most recently fetched or mutated records, newest first
    pub meetings: Vec<Meeting>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Record selected for detail views
    pub current_meeting: Option<Meeting>,
}

/// Everything that can change a [`MeetingState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingAction {
    FetchPending,
    FetchFulfilled(Vec<Meeting>),
    FetchRejected(String),
    Added(Meeting),
    Updated(Meeting),
    Deleted(Meeting),
    DeletedMany(Vec<MeetingId>),
    MutationRejected(String),
    SetCurrent(Option<Meeting>),
    ClearError,
}

impl MeetingState {
    /// Pure state transition
    pub fn apply(&mut self, action: MeetingAction) {
        match action {
            MeetingAction::FetchPending => {
                self.is_loading = true;
                self.error = None;
            }
            MeetingAction::FetchFulfilled(meetings) => {
                self.is_loading = false;
                self.meetings = meetings;
            }
            MeetingAction::FetchRejected(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            MeetingAction::Added(meeting) => prepend(&mut self.meetings, meeting),
            MeetingAction::Updated(meeting) => {
                if let Some(current) = self.current_meeting.as_mut() {
                    if current.id == meeting.id {
                        *current = meeting.clone();
                    }
                }
                replace_by_id(&mut self.meetings, meeting);
            }
            MeetingAction::Deleted(meeting) => remove_by_id(&mut self.meetings, &meeting.id),
            MeetingAction::DeletedMany(ids) => remove_many(&mut self.meetings, &ids),
            MeetingAction::MutationRejected(message) => self.error = Some(message),
            MeetingAction::SetCurrent(meeting) => self.current_meeting = meeting,
            MeetingAction::ClearError => self.error = None,
        }
    }
}

/// Insert at the head of the list
pub fn prepend(meetings: &mut Vec<Meeting>, meeting: Meeting) {
    meetings.insert(0, meeting);
}

/// Replace the record with the same id in place; returns whether one was found
pub fn replace_by_id(meetings: &mut [Meeting], meeting: Meeting) -> bool {
    match meetings.iter_mut().find(|held| held.id == meeting.id) {
        Some(held) => {
            *held = meeting;
            true
        }
        None => false,
    }
}

pub fn remove_by_id(meetings: &mut Vec<Meeting>, id: &MeetingId) {
    meetings.retain(|meeting| &meeting.id != id);
}

pub fn remove_many(meetings: &mut Vec<Meeting>, ids: &[MeetingId]) {
    meetings.retain(|meeting| !ids.contains(&meeting.id));
}

/// Cache of meetings kept in step with a server
///
/// Concurrent thunks are not deduplicated; each applies its own outcome when
/// its response arrives.
pub struct MeetingStore {
    client: MeetingsClient,
    state: RwLock<MeetingState>,
}

impl MeetingStore {
    pub fn new(client: MeetingsClient) -> Self {
        Self {
            client,
            state: RwLock::new(MeetingState::default()),
        }
    }

    pub fn client(&self) -> &MeetingsClient {
        &self.client
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> MeetingState {
        self.state.read().await.clone()
    }

    pub async fn dispatch(&self, action: MeetingAction) {
        debug!(?action, "Dispatching meeting action");
        self.state.write().await.apply(action);
    }

    /// Replace the cache with the server's list
    pub async fn fetch_all(&self, params: &ListParams) -> Result<()> {
        self.dispatch(MeetingAction::FetchPending).await;

        match self.client.list(params).await {
            Ok(meetings) => {
                self.dispatch(MeetingAction::FetchFulfilled(meetings)).await;
                Ok(())
            }
            Err(e) => {
                warn!("Fetching meetings failed: {}", e);
                self.dispatch(MeetingAction::FetchRejected(e.message())).await;
                Err(e)
            }
        }
    }

    pub async fn add(&self, meeting: &NewMeeting) -> Result<Meeting> {
        let created = self.mutate(self.client.create(meeting).await).await?;
        self.dispatch(MeetingAction::Added(created.clone())).await;
        Ok(created)
    }

    pub async fn update(&self, id: &MeetingId, changes: &UpdateMeeting) -> Result<Meeting> {
        let updated = self.mutate(self.client.update(id, changes).await).await?;
        self.dispatch(MeetingAction::Updated(updated.clone())).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &MeetingId) -> Result<Meeting> {
        let deleted = self.mutate(self.client.delete(id).await).await?;
        self.dispatch(MeetingAction::Deleted(deleted.clone())).await;
        Ok(deleted)
    }

    /// Drops exactly the records the server reports as modified
    pub async fn delete_many(&self, ids: &[MeetingId]) -> Result<DeleteManyResult> {
        let result = self.mutate(self.client.delete_many(ids).await).await?;
        self.dispatch(MeetingAction::DeletedMany(result.ids.clone()))
            .await;
        Ok(result)
    }

    pub async fn set_current(&self, meeting: Option<Meeting>) {
        self.dispatch(MeetingAction::SetCurrent(meeting)).await;
    }

    pub async fn clear_error(&self) {
        self.dispatch(MeetingAction::ClearError).await;
    }

    /// Record a failed mutation without touching the collection
    async fn mutate<T>(&self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            warn!("Meeting mutation failed: {}", e);
            self.dispatch(MeetingAction::MutationRejected(e.message()))
                .await;
        }
        outcome
    }
}
