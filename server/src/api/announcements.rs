//! Announcement API endpoints.

use super::discussions::MessageResponse;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use community_connect_core::types::{Announcement, NewAnnouncement};
use community_connect_web::{AppError, JsonBody};

/// List the board.
pub async fn list_announcements(State(state): State<AppState>) -> Json<Vec<Announcement>> {
    Json(state.announcements.list().await)
}

/// Post an announcement at the top of the board.
pub async fn create_announcement(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewAnnouncement>,
) -> (StatusCode, Json<Announcement>) {
    (
        StatusCode::CREATED,
        Json(state.announcements.create(request).await),
    )
}

/// Remove an announcement.
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.announcements.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Announcement deleted successfully".to_string(),
    }))
}
