//! HTTP handlers under `/api`.
//!
//! Handlers only translate between HTTP and the services in
//! [`crate::services`]. Every failure is an [`AppError`](community_connect_web::AppError).

pub mod announcements;
pub mod discussions;
pub mod events;
