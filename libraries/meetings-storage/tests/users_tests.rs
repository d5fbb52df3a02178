//! Integration tests for the user directory slice

mod test_helpers;

use meetings_core::types::*;
use meetings_storage::{users, StorageError};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "Olive", UserRole::SuperAdmin).await;
    let fetched = users::get_by_id(pool, &user.id).await.unwrap().unwrap();

    assert_eq!(fetched, user);
    assert_eq!(fetched.role, UserRole::SuperAdmin);
}

#[tokio::test]
async fn test_require_missing_user_is_not_found() {
    let test_db = TestDb::new().await;

    let err = users::require(test_db.pool(), &UserId::generate())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "Olive", UserRole::User).await;
    let result = users::create(
        pool,
        CreateUser {
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            email: "olive@example.com".to_string(),
            role: UserRole::User,
        },
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_resolve_skips_unknown_ids() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let olive = create_test_user(pool, "Olive", UserRole::User).await;
    let kai = create_test_user(pool, "Kai", UserRole::User).await;

    let mut resolved = users::resolve(pool, &[olive.id.clone(), UserId::generate(), kai.id.clone()])
        .await
        .unwrap();
    resolved.sort_by(|a, b| a.first_name.cmp(&b.first_name));

    assert_eq!(resolved, vec![kai.to_ref(), olive.to_ref()]);
    assert!(users::resolve(pool, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_all_sorted_by_name() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "Zed", UserRole::User).await;
    create_test_user(pool, "Amy", UserRole::User).await;

    let all = users::get_all(pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
}
