//! Tests for the meeting cache store against a mock server.

use meetings_client::{ClientConfig, ClientError, MeetingStore, MeetingsClient};
use meetings_core::{ListParams, MeetingId, NewMeeting, UpdateMeeting};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn meeting_json(id: &MeetingId, agenda: &str) -> Value {
    json!({
        "id": id,
        "agenda": agenda,
        "attendes": [],
        "attendesLead": [],
        "status": "active",
        "timestamp": "2024-06-01T09:00:00Z"
    })
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": 200,
        "message": "ok",
        "data": data
    }))
}

fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "status": status,
        "message": message
    }))
}

/// Store already holding `meetings` (newest first) fetched from the server
async fn seeded_store(server: &MockServer, meetings: &[(MeetingId, &str)]) -> MeetingStore {
    let list: Vec<Value> = meetings
        .iter()
        .map(|(id, agenda)| meeting_json(id, agenda))
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .respond_with(ok(Value::Array(list)))
        .up_to_n_times(1)
        .mount(server)
        .await;

    let client = MeetingsClient::new(ClientConfig::with_token(server.uri(), "token")).unwrap();
    let store = MeetingStore::new(client);
    store.fetch_all(&ListParams::default()).await.unwrap();
    store
}

async fn agendas(store: &MeetingStore) -> Vec<String> {
    store
        .snapshot()
        .await
        .meetings
        .into_iter()
        .map(|m| m.agenda)
        .collect()
}

#[tokio::test]
async fn test_fetch_all_replaces_collection() {
    let server = MockServer::start().await;
    let store = seeded_store(
        &server,
        &[(MeetingId::generate(), "a"), (MeetingId::generate(), "b")],
    )
    .await;

    let state = store.snapshot().await;
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(agendas(&store).await, vec!["a", "b"]);
}

#[tokio::test]
async fn test_fetch_failure_records_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .respond_with(failure(500, "Error retrieving meetings"))
        .mount(&server)
        .await;

    let client = MeetingsClient::new(ClientConfig::with_token(server.uri(), "token")).unwrap();
    let store = MeetingStore::new(client);
    let result = store.fetch_all(&ListParams::default()).await;

    assert!(matches!(result, Err(ClientError::ServerError { status: 500, .. })));
    let state = store.snapshot().await;
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Error retrieving meetings"));
    assert!(state.meetings.is_empty());
}

#[tokio::test]
async fn test_add_prepends_without_refetch() {
    let server = MockServer::start().await;
    let store = seeded_store(&server, &[(MeetingId::generate(), "old")]).await;

    let id = MeetingId::generate();
    Mock::given(method("POST"))
        .and(path("/api/meetings"))
        .respond_with(ok(meeting_json(&id, "new")))
        .mount(&server)
        .await;

    let created = store.add(&NewMeeting::new("new")).await.unwrap();

    assert_eq!(created.id, id);
    assert_eq!(agendas(&store).await, vec!["new", "old"]);
}

#[tokio::test]
async fn test_update_replaces_record_in_place() {
    let server = MockServer::start().await;
    let target = MeetingId::generate();
    let store = seeded_store(
        &server,
        &[(MeetingId::generate(), "first"), (target.clone(), "second")],
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/meetings/{target}").as_str()))
        .respond_with(ok(meeting_json(&target, "renamed")))
        .mount(&server)
        .await;

    let changes = UpdateMeeting {
        agenda: Some("renamed".to_string()),
        ..UpdateMeeting::default()
    };
    store.update(&target, &changes).await.unwrap();

    assert_eq!(agendas(&store).await, vec!["first", "renamed"]);
}

#[tokio::test]
async fn test_delete_removes_returned_record() {
    let server = MockServer::start().await;
    let target = MeetingId::generate();
    let store = seeded_store(
        &server,
        &[(target.clone(), "doomed"), (MeetingId::generate(), "kept")],
    )
    .await;

    let mut deleted = meeting_json(&target, "doomed");
    deleted["status"] = json!("deleted");
    Mock::given(method("DELETE"))
        .and(path(format!("/api/meetings/{target}").as_str()))
        .respond_with(ok(deleted))
        .mount(&server)
        .await;

    store.delete(&target).await.unwrap();

    assert_eq!(agendas(&store).await, vec!["kept"]);
}

#[tokio::test]
async fn test_delete_many_removes_only_modified_ids() {
    let server = MockServer::start().await;
    let modified = MeetingId::generate();
    let unchanged = MeetingId::generate();
    let store = seeded_store(
        &server,
        &[
            (modified.clone(), "gone"),
            (unchanged.clone(), "stays"),
            (MeetingId::generate(), "untouched"),
        ],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/api/meetings/deleteMany"))
        .respond_with(ok(json!({ "modifiedCount": 1, "ids": [modified] })))
        .mount(&server)
        .await;

    let result = store
        .delete_many(&[modified.clone(), unchanged.clone()])
        .await
        .unwrap();

    assert_eq!(result.modified_count, 1);
    assert_eq!(agendas(&store).await, vec!["stays", "untouched"]);
}

#[tokio::test]
async fn test_failed_mutation_sets_error_and_keeps_collection() {
    let server = MockServer::start().await;
    let target = MeetingId::generate();
    let store = seeded_store(&server, &[(target.clone(), "kept")]).await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/meetings/{target}").as_str()))
        .respond_with(failure(404, "Meeting not found"))
        .mount(&server)
        .await;

    assert!(store.delete(&target).await.is_err());

    let state = store.snapshot().await;
    assert_eq!(state.error.as_deref(), Some("Meeting not found"));
    assert_eq!(agendas(&store).await, vec!["kept"]);

    store.clear_error().await;
    assert!(store.snapshot().await.error.is_none());
}

#[tokio::test]
async fn test_set_current_selects_a_record() {
    let server = MockServer::start().await;
    let store = seeded_store(&server, &[(MeetingId::generate(), "pick me")]).await;

    let picked = store.snapshot().await.meetings.into_iter().next();
    store.set_current(picked.clone()).await;

    assert_eq!(store.snapshot().await.current_meeting, picked);
}
