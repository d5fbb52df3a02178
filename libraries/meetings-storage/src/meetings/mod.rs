//! Meeting record queries
//!
//! All reads exclude rows in the `deleted` state. Listing builds a single
//! conjunctive `WHERE` clause from a [`MeetingFilter`].

use crate::from_millis;
use chrono::{DateTime, Utc};
use meetings_core::{
    error::{MeetingsError, Result},
    types::*,
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

const COLUMNS: &str = "id, agenda, location, notes, date_time, create_by, attendes, attendes_lead, status, timestamp";

const ACTIVE: &str = "active";

/// Lowercased copy of a searchable field, matched against by `search`
fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    from_millis(millis)
        .ok_or_else(|| MeetingsError::database(format!("timestamp out of range: {millis}")))
}

fn from_row(row: &SqliteRow) -> Result<StoredMeeting> {
    let status: String = row.try_get("status")?;
    let status = MeetingStatus::from_db(&status)
        .ok_or_else(|| MeetingsError::database(format!("unknown meeting status: {status}")))?;

    let attendes: String = row.try_get("attendes")?;
    let attendes_lead: String = row.try_get("attendes_lead")?;

    Ok(StoredMeeting {
        id: row.try_get("id")?,
        agenda: row.try_get("agenda")?,
        location: row.try_get("location")?,
        notes: row.try_get("notes")?,
        date_time: row
            .try_get::<Option<i64>, _>("date_time")?
            .map(timestamp_from_millis)
            .transpose()?,
        create_by: row.try_get("create_by")?,
        attendes: serde_json::from_str(&attendes)?,
        attendes_lead: serde_json::from_str(&attendes_lead)?,
        status,
        timestamp: timestamp_from_millis(row.try_get("timestamp")?)?,
    })
}

/// Insert a new meeting row
pub async fn create(pool: &SqlitePool, meeting: &StoredMeeting) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meetings
            (id, agenda, location, notes, date_time, create_by, attendes, attendes_lead, status, timestamp,
             agenda_folded, location_folded, notes_folded)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&meeting.id)
    .bind(&meeting.agenda)
    .bind(&meeting.location)
    .bind(&meeting.notes)
    .bind(meeting.date_time.map(|at| at.timestamp_millis()))
    .bind(&meeting.create_by)
    .bind(serde_json::to_string(&meeting.attendes)?)
    .bind(serde_json::to_string(&meeting.attendes_lead)?)
    .bind(meeting.status.as_str())
    .bind(meeting.timestamp.timestamp_millis())
    .bind(fold(&meeting.agenda))
    .bind(meeting.location.as_deref().map(fold))
    .bind(meeting.notes.as_deref().map(fold))
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an active meeting by ID
pub async fn get_by_id(pool: &SqlitePool, id: &MeetingId) -> Result<Option<StoredMeeting>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM meetings WHERE id = ? AND status = ?"
    ))
    .bind(id)
    .bind(ACTIVE)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get a meeting by ID regardless of its lifecycle state
pub async fn get_including_deleted(
    pool: &SqlitePool,
    id: &MeetingId,
) -> Result<Option<StoredMeeting>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM meetings WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Append the filter's predicate to a query that already has a `WHERE`
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &MeetingFilter) {
    query.push(" AND status = ").push_bind(ACTIVE);

    if let Visibility::OwnedBy(owner) = &filter.visibility {
        query.push(" AND create_by = ").push_bind(owner.as_str().to_string());
    }

    if let Some(range) = filter.date_range {
        query
            .push(" AND date_time BETWEEN ")
            .push_bind(range.start.timestamp_millis())
            .push(" AND ")
            .push_bind(range.end.timestamp_millis());
    }

    if let Some(term) = &filter.search {
        let needle = fold(term);
        query
            .push(" AND (instr(agenda_folded, ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(coalesce(location_folded, ''), ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(coalesce(notes_folded, ''), ")
            .push_bind(needle)
            .push(") > 0)");
    }
}

/// List active meetings matching the filter, most recently touched first
pub async fn list(pool: &SqlitePool, filter: &MeetingFilter) -> Result<Vec<StoredMeeting>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM meetings WHERE 1 = 1"));
    push_filter(&mut query, filter);
    query.push(" ORDER BY timestamp DESC, seq DESC");

    let rows = query.build().fetch_all(pool).await?;

    rows.iter().map(from_row).collect()
}

/// Merge changes into an active meeting
///
/// The merged record is validated before anything is written; read, merge and
/// write share one transaction.
pub async fn update(
    pool: &SqlitePool,
    id: &MeetingId,
    changes: UpdateMeeting,
    now: DateTime<Utc>,
) -> Result<Option<StoredMeeting>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM meetings WHERE id = ? AND status = ?"
    ))
    .bind(id)
    .bind(ACTIVE)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut meeting = from_row(&row)?;
    changes.apply_to(&mut meeting, now);
    meeting.validate()?;

    let row = sqlx::query(&format!(
        r#"
        UPDATE meetings
        SET agenda = ?, location = ?, notes = ?, date_time = ?, create_by = ?,
            attendes = ?, attendes_lead = ?, timestamp = ?,
            agenda_folded = ?, location_folded = ?, notes_folded = ?
        WHERE id = ? AND status = ?
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&meeting.agenda)
    .bind(&meeting.location)
    .bind(&meeting.notes)
    .bind(meeting.date_time.map(|at| at.timestamp_millis()))
    .bind(&meeting.create_by)
    .bind(serde_json::to_string(&meeting.attendes)?)
    .bind(serde_json::to_string(&meeting.attendes_lead)?)
    .bind(meeting.timestamp.timestamp_millis())
    .bind(fold(&meeting.agenda))
    .bind(meeting.location.as_deref().map(fold))
    .bind(meeting.notes.as_deref().map(fold))
    .bind(id)
    .bind(ACTIVE)
    .fetch_optional(&mut *tx)
    .await?;

    let updated = row.as_ref().map(from_row).transpose()?;
    tx.commit().await?;

    Ok(updated)
}

/// Move an active meeting to the deleted state, returning the new row
pub async fn soft_delete(
    pool: &SqlitePool,
    id: &MeetingId,
    now: DateTime<Utc>,
) -> Result<Option<StoredMeeting>> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE meetings
        SET status = ?, timestamp = ?
        WHERE id = ? AND status = ?
        RETURNING {COLUMNS}
        "#
    ))
    .bind(MeetingStatus::Deleted.as_str())
    .bind(now.timestamp_millis())
    .bind(id)
    .bind(ACTIVE)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Move every matching active meeting to the deleted state
///
/// A single `UPDATE` statement, so the matched set changes atomically.
/// Returns the IDs that actually changed.
pub async fn soft_delete_many(
    pool: &SqlitePool,
    ids: &[MeetingId],
    now: DateTime<Utc>,
) -> Result<Vec<MeetingId>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    // One bound JSON array keeps the statement under SQLite's variable limit
    let ids = serde_json::to_string(ids)?;
    let rows = sqlx::query(
        r#"
        UPDATE meetings
        SET status = ?, timestamp = ?
        WHERE status = ? AND id IN (SELECT value FROM json_each(?))
        RETURNING id
        "#,
    )
    .bind(MeetingStatus::Deleted.as_str())
    .bind(now.timestamp_millis())
    .bind(ACTIVE)
    .bind(ids)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| row.try_get::<MeetingId, _>("id").map_err(MeetingsError::from))
        .collect()
}
