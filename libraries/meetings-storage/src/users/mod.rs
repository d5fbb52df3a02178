//! User directory queries
//!
//! Meetings only ever read the display projection of a user; the directory
//! itself is owned by the surrounding CRM and written here for tooling and
//! tests.

use crate::error::{Result, StorageError};
use meetings_core::types::{CreateUser, User, UserId, UserRef, UserRole};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

fn from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role")?;
    let role = UserRole::from_db(&role)
        .ok_or_else(|| StorageError::CorruptRow(format!("unknown user role: {role}")))?;

    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        role,
    })
}

/// Create a directory user with a fresh ID
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let id = UserId::generate();

    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, role) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(user.role.as_str())
    .execute(pool)
    .await?;

    Ok(User {
        id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        role: user.role,
    })
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, email, role FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get user by ID, failing when it does not exist
pub async fn require(pool: &SqlitePool, id: &UserId) -> Result<User> {
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", id.as_str()))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT id, first_name, last_name, email, role FROM users ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Display projections for a batch of IDs in one query
///
/// IDs with no directory entry are simply absent from the result.
pub async fn resolve(pool: &SqlitePool, ids: &[UserId]) -> Result<Vec<UserRef>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT id, first_name, last_name, email FROM users WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.as_str().to_string());
    }
    separated.push_unseparated(")");

    let rows = query.build().fetch_all(pool).await?;

    rows.iter()
        .map(|row| {
            Ok::<_, StorageError>(UserRef {
                id: row.try_get("id")?,
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                email: row.try_get("email")?,
            })
        })
        .collect()
}
