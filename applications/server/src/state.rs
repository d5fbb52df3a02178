/// Shared application state
use crate::services::{AuthService, MeetingService};
use meetings_storage::LocalStorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<LocalStorageContext>,
    pub auth_service: Arc<AuthService>,
    pub meetings: Arc<MeetingService>,
}

impl AppState {
    pub fn new(storage: Arc<LocalStorageContext>, auth_service: Arc<AuthService>) -> Self {
        let meetings = Arc::new(MeetingService::new(storage.clone()));
        Self {
            storage,
            auth_service,
            meetings,
        }
    }
}
