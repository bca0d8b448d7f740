//! Event API endpoints.
//!
//! - GET /api/events - List events, earliest date first
//! - POST /api/events - Create an event
//! - GET /api/events/:id - Get one event
//! - POST /api/events/:id/rsvp - Record or change an RSVP
//! - POST /api/events/sample - Replace all events with the sample pair

use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use community_connect_core::types::{Event, NewEvent, RsvpRequest};
use community_connect_web::{AppError, JsonBody};
use serde::Serialize;

/// Response after reseeding.
#[derive(Debug, Serialize)]
pub struct SampleEventsResponse {
    /// Confirmation message
    pub message: String,
    /// The freshly inserted events
    pub events: Vec<Event>,
}

/// List all events.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5001/api/events
/// ```
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.events.list().await?))
}

/// Get event details by ID.
///
/// Unknown and malformed ids both answer 404.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.events.get(&id).await?))
}

/// Create a new event.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5001/api/events \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Yoga Session",
///     "description": "Morning yoga",
///     "date": "2024-01-25",
///     "time": "7:00 AM",
///     "location": "Central Park"
///   }'
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.events.create(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Record the caller's RSVP and return the whole updated event.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5001/api/events/<id>/rsvp \
///   -H "Content-Type: application/json" \
///   -d '{"response": "yes", "userId": "u1", "username": "Alice"}'
/// ```
pub async fn rsvp_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<RsvpRequest>,
) -> Result<Json<Event>, AppError> {
    Ok(Json(state.events.rsvp(&id, request).await?))
}

/// Delete every event and insert the two sample events.
pub async fn seed_sample_events(
    State(state): State<AppState>,
) -> Result<Json<SampleEventsResponse>, AppError> {
    let events = state.events.seed_samples().await?;
    Ok(Json(SampleEventsResponse {
        message: "Sample events created".to_string(),
        events,
    }))
}
