/// User directory types
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Role of a directory user, governing which meetings they can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Sees every meeting
    SuperAdmin,
    /// Sees only the meetings they created
    #[default]
    User,
}

impl UserRole {
    /// Convert role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superAdmin",
            Self::User => "user",
        }
    }

    /// Parse role from database string
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "superAdmin" => Some(Self::SuperAdmin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// A user record as stored in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub role: UserRole,
}

impl User {
    /// Display projection used when expanding references
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Data for inserting a directory user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
}

/// Expanded user reference: the display fields of a referenced user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
