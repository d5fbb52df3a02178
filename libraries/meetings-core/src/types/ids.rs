/// ID types for meeting records and their user references
use crate::error::{MeetingsError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Canonical (lowercase, hyphenated) form of a UUID string, if it is one
fn canonical(raw: &str) -> Option<String> {
    Uuid::try_parse(raw)
        .ok()
        .map(|id| id.hyphenated().to_string())
}

/// User identifier
///
/// Deserialized ids that are UUIDs arrive in canonical form; anything else is
/// kept as sent so validation can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier without validating it
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random user ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a caller-supplied identifier, rejecting anything that is not a UUID
    pub fn parse(raw: &str) -> Result<Self> {
        canonical(raw)
            .map(Self)
            .ok_or_else(|| MeetingsError::invalid_input(format!("Malformed user id: {raw}")))
    }

    /// Whether this identifier is well-formed
    pub fn is_valid(&self) -> bool {
        canonical(&self.0).is_some()
    }

    /// Canonical form of a well-formed id; malformed ids pass through unchanged
    pub fn normalized(self) -> Self {
        match canonical(&self.0) {
            Some(id) => Self(id),
            None => self,
        }
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(|raw| Self(raw).normalized())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlx")]
impl Type<Sqlite> for UserId {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> Encode<'q, Sqlite> for UserId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> Decode<'r, Sqlite> for UserId {
    fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(UserId(s))
    }
}

/// Meeting identifier
///
/// Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(String);

impl MeetingId {
    /// Wrap a raw identifier without validating it
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random meeting ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a caller-supplied identifier, rejecting anything that is not a UUID
    pub fn parse(raw: &str) -> Result<Self> {
        canonical(raw)
            .map(Self)
            .ok_or_else(|| MeetingsError::invalid_input(format!("Malformed meeting id: {raw}")))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlx")]
impl Type<Sqlite> for MeetingId {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> Encode<'q, Sqlite> for MeetingId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> Decode<'r, Sqlite> for MeetingId {
    fn decode(value: SqliteValueRef<'r>) -> std::result::Result<Self, BoxDynError> {
        let s = <String as Decode<Sqlite>>::decode(value)?;
        Ok(MeetingId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_valid() {
        let id1 = MeetingId::generate();
        let id2 = MeetingId::generate();
        assert_ne!(id1, id2);
        assert!(MeetingId::parse(id1.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(MeetingId::parse("").is_err());
        assert!(MeetingId::parse("not-an-id").is_err());
        assert!(MeetingId::parse("123").is_err());
        assert!(UserId::parse("65f0c2a1b3e4d5f6a7b8c9d0").is_err());
    }

    #[test]
    fn parse_canonicalizes_case() {
        let id = MeetingId::parse("6F9619FF-8B86-D011-B42D-00C04FC964FF").unwrap();
        assert_eq!(id.as_str(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");
    }

    #[test]
    fn user_id_validity() {
        assert!(UserId::generate().is_valid());
        assert!(!UserId::new("alice").is_valid());
    }

    #[test]
    fn meeting_id_display() {
        let id = MeetingId::new("meeting-456");
        assert_eq!(format!("{}", id), "meeting-456");
    }

    #[test]
    fn deserialized_user_ids_are_canonical() {
        let id: UserId = serde_json::from_str("\"6F9619FF-8B86-D011-B42D-00C04FC964FF\"").unwrap();
        assert_eq!(id.as_str(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");

        // Malformed ids survive deserialization for validation to reject
        let id: UserId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert!(!id.is_valid());
    }
}
