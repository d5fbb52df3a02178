/// List filters for meetings
use crate::error::{MeetingsError, Result};
use crate::types::{User, UserId, UserRole};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw list parameters as they arrive on the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Which owners' meetings a caller may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    All,
    OwnedBy(UserId),
}

/// Inclusive bounds on a meeting's `dateTime`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Conjunctive predicate over active meetings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingFilter {
    pub visibility: Visibility,
    pub date_range: Option<DateRange>,
    /// Case-insensitive substring matched against agenda, location, notes
    pub search: Option<String>,
}

impl MeetingFilter {
    /// Filter with no narrowing beyond excluding deleted records
    pub fn all() -> Self {
        Self {
            visibility: Visibility::All,
            date_range: None,
            search: None,
        }
    }

    /// Build the filter for an authenticated caller
    ///
    /// Visibility comes from the caller's role, never from the query string
    /// alone: a super admin may narrow by `createBy`, everyone else is pinned
    /// to their own records.
    pub fn resolve(caller: &User, params: &ListParams) -> Result<Self> {
        let requested_owner = match non_empty(params.create_by.as_deref()) {
            Some(raw) => Some(
                UserId::parse(raw)
                    .map_err(|_| MeetingsError::invalid_input("Invalid createBy user ID"))?,
            ),
            None => None,
        };

        let visibility = match caller.role {
            UserRole::SuperAdmin => requested_owner.map_or(Visibility::All, Visibility::OwnedBy),
            UserRole::User => Visibility::OwnedBy(caller.id.clone()),
        };

        let date_range = match (
            non_empty(params.start_date.as_deref()),
            non_empty(params.end_date.as_deref()),
        ) {
            (Some(start), Some(end)) => Some(DateRange {
                start: parse_date_bound(start)?,
                end: parse_date_bound(end)?,
            }),
            _ => None,
        };

        Ok(Self {
            visibility,
            date_range,
            search: non_empty(params.search.as_deref()).map(str::to_string),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse a date bound: RFC 3339, a zone-less date-time (UTC), or a bare
/// date (midnight UTC)
pub fn parse_date_bound(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(at.and_utc());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(MeetingsError::invalid_input(format!("Invalid date: {raw}")))
}
