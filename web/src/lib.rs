//! Axum integration for CommunityConnect.
//!
//! This crate is the imperative shell around the functional core in
//! `community-connect-core`: it turns domain failures into HTTP responses and
//! carries request-scoped tracing context.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, CORS
//! │  - Request parsing                      │  ← Correlation IDs
//! │  - Response serialization               │  ← Logging, metrics
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - RSVP ledger reconciliation           │  ← Testable at memory speed
//! │  - Payload validation                   │  ← No I/O, no side effects
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use community_connect_web::{AppError, JsonBody};
//! use axum::{Router, routing::post, Json};
//!
//! async fn rsvp(
//!     State(state): State<AppState>,
//!     Path(id): Path<String>,
//!     JsonBody(request): JsonBody<RsvpRequest>,
//! ) -> Result<Json<Event>, AppError> {
//!     Ok(Json(state.events.rsvp(id, request).await?))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, JsonBody};
pub use handlers::{DatabaseStatus, HealthReport};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationIdExt, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
