//! Health and banner endpoints.

use super::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use community_connect_web::HealthReport;
use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    /// Fixed greeting
    pub message: &'static str,
    /// Time the request was answered
    pub timestamp: DateTime<Utc>,
}

/// Root banner.
///
/// ```bash
/// curl http://localhost:5001/
/// # {"message":"CommunityConnect Backend is running!","timestamp":"..."}
/// ```
#[allow(clippy::unused_async)]
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "CommunityConnect Backend is running!",
        timestamp: Utc::now(),
    })
}

/// Health check endpoint.
///
/// Always 200 while the process answers. The `database` field reports
/// whether the event store responded to a ping.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let reachable = state.events.is_reachable().await;
    if !reachable {
        tracing::warn!("Health check: database unreachable");
    }
    HealthReport::new(reachable).into_json()
}
