/// API route modules
pub mod health;
pub mod meetings;

use crate::{middleware, services::AuthService, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
///
/// Everything except the health check sits behind the JWT middleware.
pub fn create_router(app_state: AppState) -> Router {
    let auth_service: Arc<AuthService> = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health::health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/meetings",
            get(meetings::list_meetings).post(meetings::add_meeting),
        )
        .route("/meetings/deleteMany", post(meetings::delete_many_meetings))
        .route(
            "/meetings/:id",
            get(meetings::get_meeting)
                .put(meetings::update_meeting)
                .delete(meetings::delete_meeting),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
