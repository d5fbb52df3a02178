/// Meetings API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use meetings_core::{
    DeleteManyResult, Envelope, ListParams, Meeting, MeetingsError, NewMeeting, UpdateMeeting,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteManyRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// POST /api/meetings
/// Create a meeting; `createBy` defaults to the caller
pub async fn add_meeting(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<NewMeeting>, JsonRejection>,
) -> Result<Json<Envelope<Meeting>>> {
    const CONTEXT: &str = "Error adding meeting";

    let Json(payload) = payload.map_err(|e| unreadable_body(CONTEXT, &e))?;
    let meeting = app_state
        .meetings
        .add(auth.user_id(), payload)
        .await
        .map_err(ServerError::meetings(CONTEXT))?;

    Ok(Json(Envelope::ok("Meeting added successfully", meeting)))
}

/// GET /api/meetings?createBy=&startDate=&endDate=&search=
/// List active meetings visible to the caller
pub async fn list_meetings(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Meeting>>>> {
    const CONTEXT: &str = "Error retrieving meetings";

    let Query(params) = params.map_err(|e| {
        ServerError::meetings(CONTEXT)(MeetingsError::invalid_input(e.body_text()))
    })?;
    let meetings = app_state
        .meetings
        .list(auth.user_id(), &params)
        .await
        .map_err(ServerError::meetings(CONTEXT))?;

    Ok(Json(Envelope::ok("Meetings retrieved successfully", meetings)))
}

/// GET /api/meetings/:id
pub async fn get_meeting(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Envelope<Meeting>>> {
    let meeting = app_state
        .meetings
        .view(&id)
        .await
        .map_err(ServerError::meetings("Error retrieving meeting"))?;

    Ok(Json(Envelope::ok("Meeting retrieved successfully", meeting)))
}

/// PUT /api/meetings/:id
/// Partial update; absent fields keep their stored values
pub async fn update_meeting(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    payload: std::result::Result<Json<UpdateMeeting>, JsonRejection>,
) -> Result<Json<Envelope<Meeting>>> {
    const CONTEXT: &str = "Error updating meeting";

    let Json(changes) = payload.map_err(|e| unreadable_body(CONTEXT, &e))?;
    let meeting = app_state
        .meetings
        .update(&id, changes)
        .await
        .map_err(ServerError::meetings(CONTEXT))?;

    Ok(Json(Envelope::ok("Meeting updated successfully", meeting)))
}

/// DELETE /api/meetings/:id
/// Soft delete; the response carries the record in its deleted state
pub async fn delete_meeting(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Envelope<Meeting>>> {
    let meeting = app_state
        .meetings
        .delete_one(&id)
        .await
        .map_err(ServerError::meetings("Error deleting meeting"))?;

    Ok(Json(Envelope::ok("Meeting deleted successfully", meeting)))
}

/// POST /api/meetings/deleteMany
/// Body: `{ "ids": [...] }`
pub async fn delete_many_meetings(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    payload: std::result::Result<Json<DeleteManyRequest>, JsonRejection>,
) -> Result<Json<Envelope<DeleteManyResult>>> {
    const CONTEXT: &str = "Error deleting meetings";

    let ids = match payload {
        Ok(Json(req)) => req.ids,
        Err(e) => {
            tracing::debug!("Rejected deleteMany body: {}", e.body_text());
            Vec::new()
        }
    };

    let result = app_state
        .meetings
        .delete_many(&ids)
        .await
        .map_err(ServerError::meetings(CONTEXT))?;

    let message = format!("Successfully deleted {} meetings", result.modified_count);
    Ok(Json(Envelope::ok(message, result)))
}

/// A body that cannot be read as a meeting payload fails validation
fn unreadable_body(context: &'static str, rejection: &JsonRejection) -> ServerError {
    ServerError::meetings(context)(MeetingsError::validation(rejection.body_text()))
}
