//! HTTP client for the meetings resource.

use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use meetings_core::{
    DeleteManyResult, Envelope, ListParams, Meeting, MeetingId, NewMeeting, UpdateMeeting,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

#[derive(Serialize)]
struct DeleteManyRequest<'a> {
    ids: &'a [MeetingId],
}

/// Client for the `/api/meetings` resource.
///
/// Every call needs an access token; responses are unwrapped from the
/// server's `{ status, message, data?, error? }` envelope.
#[derive(Clone)]
pub struct MeetingsClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl MeetingsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("meetings-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                access_token: config.access_token,
            })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the access token (e.g., from stored credentials).
    pub async fn set_token(&self, access_token: impl Into<String>) {
        self.config.write().await.access_token = Some(access_token.into());
    }

    /// Clear the stored token (logout).
    pub async fn clear_token(&self) {
        self.config.write().await.access_token = None;
        info!("Logged out");
    }

    /// GET /api/meetings
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Meeting>> {
        let (url, token) = self.endpoint("/api/meetings").await?;
        debug!(url = %url, ?params, "Fetching meetings");

        let meetings: Vec<Meeting> =
            send(self.http.get(&url).bearer_auth(token).query(params)).await?;
        debug!(count = meetings.len(), "Fetched meetings");

        Ok(meetings)
    }

    /// GET /api/meetings/:id
    pub async fn get(&self, id: &MeetingId) -> Result<Meeting> {
        let (url, token) = self.endpoint(&format!("/api/meetings/{id}")).await?;
        debug!(url = %url, "Fetching meeting");

        send(self.http.get(&url).bearer_auth(token)).await
    }

    /// POST /api/meetings
    pub async fn create(&self, meeting: &NewMeeting) -> Result<Meeting> {
        let (url, token) = self.endpoint("/api/meetings").await?;
        debug!(url = %url, "Creating meeting");

        send(self.http.post(&url).bearer_auth(token).json(meeting)).await
    }

    /// PUT /api/meetings/:id
    pub async fn update(&self, id: &MeetingId, changes: &UpdateMeeting) -> Result<Meeting> {
        let (url, token) = self.endpoint(&format!("/api/meetings/{id}")).await?;
        debug!(url = %url, "Updating meeting");

        send(self.http.put(&url).bearer_auth(token).json(changes)).await
    }

    /// DELETE /api/meetings/:id
    pub async fn delete(&self, id: &MeetingId) -> Result<Meeting> {
        let (url, token) = self.endpoint(&format!("/api/meetings/{id}")).await?;
        debug!(url = %url, "Deleting meeting");

        send(self.http.delete(&url).bearer_auth(token)).await
    }

    /// POST /api/meetings/deleteMany
    pub async fn delete_many(&self, ids: &[MeetingId]) -> Result<DeleteManyResult> {
        let (url, token) = self.endpoint("/api/meetings/deleteMany").await?;
        debug!(url = %url, count = ids.len(), "Deleting meetings");

        send(
            self.http
                .post(&url)
                .bearer_auth(token)
                .json(&DeleteManyRequest { ids }),
        )
        .await
    }

    async fn endpoint(&self, path: &str) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        Ok((format!("{}{}", config.url, path), token))
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })?;

    read_envelope(response).await
}

/// Unwrap `data` from a success envelope, or turn a failure into an error
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.as_u16() == 401 {
        return Err(ClientError::AuthRequired);
    }

    let body = response.text().await?;

    if status.is_success() {
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse response: {}", e)))?;
        return envelope
            .data
            .ok_or_else(|| ClientError::ParseError("Response carried no data".into()));
    }

    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
        .map(|envelope| envelope.message)
        .unwrap_or(body);

    Err(ClientError::ServerError {
        status: status.as_u16(),
        message,
    })
}
