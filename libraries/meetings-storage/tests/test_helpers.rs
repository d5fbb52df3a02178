//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and indexes.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use meetings_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = meetings_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        meetings_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fixed reference instant so ordering assertions are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn minutes_after_base(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

/// Test fixture: Create a directory user
pub async fn create_test_user(pool: &SqlitePool, first_name: &str, role: UserRole) -> User {
    meetings_storage::users::create(
        pool,
        CreateUser {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            role,
        },
    )
    .await
    .expect("Failed to create test user")
}

/// Test fixture: Insert a meeting owned by `owner`, touched at `timestamp`
pub async fn create_test_meeting(
    pool: &SqlitePool,
    owner: &UserId,
    payload: NewMeeting,
    timestamp: DateTime<Utc>,
) -> StoredMeeting {
    let meeting = payload.into_stored(MeetingId::generate(), owner, timestamp);
    meetings_storage::meetings::create(pool, &meeting)
        .await
        .expect("Failed to create test meeting");
    meeting
}
