//! Discussion API endpoints.

use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use community_connect_core::types::{Discussion, NewDiscussion, NewReply};
use community_connect_web::{AppError, JsonBody};
use serde::Serialize;

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// Response after deleting a thread.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDeletedResponse {
    /// Confirmation message
    pub message: String,
    /// Id of the removed thread
    pub deleted_id: String,
}

/// Response after deleting a reply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDeletedResponse {
    /// Confirmation message
    pub message: String,
    /// Thread the reply belonged to
    pub discussion_id: String,
    /// Id of the removed reply
    pub reply_id: String,
}

/// Route smoke test.
#[allow(clippy::unused_async)]
pub async fn discussions_test() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "✅ Discussions route working!".to_string(),
    })
}

/// List all threads, newest first.
pub async fn list_discussions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Discussion>>, AppError> {
    Ok(Json(state.discussions.list().await?))
}

/// Open a new thread.
pub async fn create_discussion(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewDiscussion>,
) -> Result<(StatusCode, Json<Discussion>), AppError> {
    let discussion = state.discussions.create(request).await?;
    Ok((StatusCode::CREATED, Json(discussion)))
}

/// Reply to a thread and return it with the new reply appended.
pub async fn add_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<NewReply>,
) -> Result<Json<Discussion>, AppError> {
    Ok(Json(state.discussions.add_reply(&id, request).await?))
}

/// Delete a thread and all of its replies.
pub async fn delete_discussion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiscussionDeletedResponse>, AppError> {
    let deleted = state.discussions.delete(&id).await?;
    Ok(Json(DiscussionDeletedResponse {
        message: "Discussion deleted successfully".to_string(),
        deleted_id: deleted.id.to_string(),
    }))
}

/// Remove one reply from a thread.
pub async fn delete_reply(
    State(state): State<AppState>,
    Path((discussion_id, reply_id)): Path<(String, String)>,
) -> Result<Json<ReplyDeletedResponse>, AppError> {
    state.discussions.delete_reply(&discussion_id, &reply_id).await?;
    Ok(Json(ReplyDeletedResponse {
        message: "Reply deleted successfully".to_string(),
        discussion_id,
        reply_id,
    }))
}
