//! HTTP server module for the CommunityConnect portal.
//!
//! This module provides the Axum-based HTTP server with:
//! - Application state management
//! - Health check endpoints
//! - Router configuration

pub mod health;
pub mod routes;
pub mod state;

pub use health::health;
pub use routes::build_router;
pub use state::AppState;
