//! Router configuration for the CommunityConnect portal.

use super::health::{banner, health};
use super::state::AppState;
use crate::api::{announcements, discussions, events};
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use community_connect_web::{correlation_id_layer, handlers::health_check};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Configures all routes including:
/// - Banner and health checks
/// - Event and RSVP endpoints
/// - Discussion endpoints
/// - Announcement endpoints
///
/// Unmatched paths answer 404 `{"message":"Route not found"}`. A known path
/// with the wrong method answers 405, so `GET /api/events/sample` does not
/// reseed.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/sample", post(events::seed_sample_events))
        .route("/events/:id", get(events::get_event))
        .route("/events/:id/rsvp", post(events::rsvp_event))
        // Discussions
        .route("/discussions/test", get(discussions::discussions_test))
        .route(
            "/discussions",
            get(discussions::list_discussions).post(discussions::create_discussion),
        )
        .route("/discussions/:id", delete(discussions::delete_discussion))
        .route("/discussions/:id/replies", post(discussions::add_reply))
        .route(
            "/discussions/:id/replies/:reply_id",
            delete(discussions::delete_reply),
        )
        // Announcements
        .route(
            "/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route("/announcements/:id", delete(announcements::delete_announcement));

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/health/live", get(health_check))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Route not found" })))
}
