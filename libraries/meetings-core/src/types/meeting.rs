/// Meeting domain types
use crate::error::{MeetingsError, Result};
use crate::types::{MeetingId, UserId, UserRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Lifecycle state of a meeting record
///
/// Records are never physically removed; deletion moves them to `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    #[default]
    Active,
    Deleted,
}

impl MeetingStatus {
    /// Convert status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    /// Parse status from database string
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// A meeting as returned on every read path, with user references expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: MeetingId,

    pub agenda: String,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// When the meeting takes place (distinct from the audit timestamp)
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,

    /// Owning user; `None` when the reference no longer resolves
    #[serde(default)]
    pub create_by: Option<UserRef>,

    #[serde(default)]
    pub attendes: Vec<UserRef>,

    #[serde(default)]
    pub attendes_lead: Vec<UserRef>,

    pub status: MeetingStatus,

    /// Audit timestamp, refreshed on every mutation
    pub timestamp: DateTime<Utc>,
}

impl Meeting {
    /// Boolean view of the lifecycle state
    pub fn is_deleted(&self) -> bool {
        self.status == MeetingStatus::Deleted
    }
}

/// A meeting as persisted: user references are bare identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMeeting {
    pub id: MeetingId,
    pub agenda: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub create_by: Option<UserId>,
    pub attendes: Vec<UserId>,
    pub attendes_lead: Vec<UserId>,
    pub status: MeetingStatus,
    pub timestamp: DateTime<Utc>,
}

impl StoredMeeting {
    /// Field-level rules shared by create and update
    pub fn validate(&self) -> Result<()> {
        if self.agenda.trim().is_empty() {
            return Err(MeetingsError::validation("agenda is required"));
        }

        match &self.create_by {
            None => return Err(MeetingsError::validation("createBy is required")),
            Some(owner) if !owner.is_valid() => {
                return Err(MeetingsError::validation(format!(
                    "createBy is not a valid user reference: {owner}"
                )));
            }
            Some(_) => {}
        }

        if let Some(bad) = self
            .attendes
            .iter()
            .chain(&self.attendes_lead)
            .find(|id| !id.is_valid())
        {
            return Err(MeetingsError::validation(format!(
                "attendee is not a valid user reference: {bad}"
            )));
        }

        Ok(())
    }

    /// Every user this record points at
    pub fn referenced_users(&self) -> impl Iterator<Item = &UserId> {
        self.create_by
            .iter()
            .chain(&self.attendes)
            .chain(&self.attendes_lead)
    }

    /// Expand user references from a resolved directory
    ///
    /// A dangling owner becomes `None`; dangling attendees are dropped.
    pub fn hydrate(self, directory: &HashMap<UserId, UserRef>) -> Meeting {
        let resolve = |ids: Vec<UserId>| -> Vec<UserRef> {
            ids.iter().filter_map(|id| directory.get(id).cloned()).collect()
        };

        Meeting {
            create_by: self.create_by.and_then(|id| directory.get(&id).cloned()),
            attendes: resolve(self.attendes),
            attendes_lead: resolve(self.attendes_lead),
            id: self.id,
            agenda: self.agenda,
            location: self.location,
            notes: self.notes,
            date_time: self.date_time,
            status: self.status,
            timestamp: self.timestamp,
        }
    }
}

/// Distinct user ids referenced by a batch of records, in stable order
pub fn referenced_users(meetings: &[StoredMeeting]) -> Vec<UserId> {
    meetings
        .iter()
        .flat_map(StoredMeeting::referenced_users)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Canonicalize references and collapse duplicates, keeping first occurrence order
fn dedup_refs(ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(UserId::normalized)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Payload for creating a meeting
///
/// Lifecycle state and audit timestamp are not part of the payload; any such
/// fields sent by a caller are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    #[serde(default)]
    pub agenda: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,

    /// Owner; defaults to the authenticated caller when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_by: Option<UserId>,

    #[serde(default)]
    pub attendes: Vec<UserId>,

    #[serde(default)]
    pub attendes_lead: Vec<UserId>,
}

impl NewMeeting {
    /// Create a payload with just an agenda
    pub fn new(agenda: impl Into<String>) -> Self {
        Self {
            agenda: agenda.into(),
            ..Self::default()
        }
    }

    /// Build the record to persist: always active, stamped with `now`
    pub fn into_stored(self, id: MeetingId, caller: &UserId, now: DateTime<Utc>) -> StoredMeeting {
        StoredMeeting {
            id,
            agenda: self.agenda,
            location: self.location,
            notes: self.notes,
            date_time: self.date_time,
            create_by: Some(
                self.create_by
                    .map(UserId::normalized)
                    .unwrap_or_else(|| caller.clone()),
            ),
            attendes: dedup_refs(self.attendes),
            attendes_lead: dedup_refs(self.attendes_lead),
            status: MeetingStatus::Active,
            timestamp: now,
        }
    }
}

/// Payload for updating a meeting; present fields replace stored ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeeting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_by: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendes: Option<Vec<UserId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendes_lead: Option<Vec<UserId>>,
}

impl UpdateMeeting {
    /// Merge into a stored record and refresh its audit timestamp
    pub fn apply_to(self, meeting: &mut StoredMeeting, now: DateTime<Utc>) {
        if let Some(agenda) = self.agenda {
            meeting.agenda = agenda;
        }
        if let Some(location) = self.location {
            meeting.location = Some(location);
        }
        if let Some(notes) = self.notes {
            meeting.notes = Some(notes);
        }
        if let Some(date_time) = self.date_time {
            meeting.date_time = Some(date_time);
        }
        if let Some(owner) = self.create_by {
            meeting.create_by = Some(owner.normalized());
        }
        if let Some(attendes) = self.attendes {
            meeting.attendes = dedup_refs(attendes);
        }
        if let Some(leads) = self.attendes_lead {
            meeting.attendes_lead = dedup_refs(leads);
        }
        meeting.timestamp = now;
    }
}

/// Outcome of a bulk soft delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyResult {
    /// Number of records that actually changed state
    pub modified_count: u64,

    /// Identifiers of the records that changed state
    pub ids: Vec<MeetingId>,
}
