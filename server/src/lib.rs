//! # CommunityConnect Server
//!
//! HTTP backend for the CommunityConnect portal: events with RSVP ledgers,
//! discussion threads and the announcement board.
//!
//! The binary in `main.rs` reads [`config::Config`], picks a storage backend,
//! and serves [`server::build_router`]. Integration tests build the same router
//! over in-memory stores.

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;
pub mod services;

pub use config::{Config, ConfigError, StorageBackend};
pub use server::{AppState, build_router};
