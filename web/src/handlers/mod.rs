//! HTTP request handlers shared by CommunityConnect services.

pub mod health;

pub use health::{DatabaseStatus, HealthReport, health_check};
