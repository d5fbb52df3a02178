//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use meetings_core::types::{CreateUser, User, UserRole};
use meetings_server::{create_router, services::AuthService, state::AppState};
use meetings_storage::LocalStorageContext;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Storage on a real temp-file database with migrations applied
pub struct TestStorage {
    pub storage: Arc<LocalStorageContext>,
    _temp_dir: TempDir,
}

impl TestStorage {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = meetings_storage::create_pool(&db_url).await.unwrap();
        meetings_storage::run_migrations(&pool).await.unwrap();

        Self {
            storage: Arc::new(LocalStorageContext::new(pool)),
            _temp_dir: temp_dir,
        }
    }

    pub async fn add_user(&self, first_name: &str, role: UserRole) -> User {
        meetings_storage::users::create(
            self.storage.pool(),
            CreateUser {
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                role,
            },
        )
        .await
        .unwrap()
    }
}

/// Full router over a fresh database
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub db: TestStorage,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestStorage::new().await;
        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1));
        let router = create_router(AppState::new(
            Arc::clone(&db.storage),
            Arc::clone(&auth_service),
        ));

        Self {
            router,
            auth_service,
            db,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        self.auth_service.create_access_token(&user.id).unwrap()
    }

    /// Send one request and decode the JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}
