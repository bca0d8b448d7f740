//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the process is serving requests.
/// This endpoint does NOT check the database.
///
/// # Endpoint
///
/// ```text
/// GET /health/live
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Database reachability as reported by `/health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DatabaseStatus {
    /// The store answered a ping
    Connected,
    /// The store could not be reached
    Disconnected,
}

/// Body of `GET /health`.
///
/// ```json
/// { "status": "OK", "database": "Connected" }
/// ```
///
/// The process is up whenever it can answer, so `status` is always `"OK"`
/// and the response is always 200; only `database` varies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Always `"OK"`
    pub status: &'static str,
    /// Database reachability
    pub database: DatabaseStatus,
}

impl HealthReport {
    /// Build a report from the result of a store ping.
    #[must_use]
    pub const fn new(database_reachable: bool) -> Self {
        Self {
            status: "OK",
            database: if database_reachable {
                DatabaseStatus::Connected
            } else {
                DatabaseStatus::Disconnected
            },
        }
    }

    /// Render as a 200 JSON response.
    #[must_use]
    pub fn into_json(self) -> (StatusCode, Json<Self>) {
        (StatusCode::OK, Json(self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[test]
    fn test_report_wire_format() {
        let json = serde_json::to_value(HealthReport::new(false)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "OK", "database": "Disconnected"}));

        let (status, Json(report)) = HealthReport::new(true).into_json();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report.database, DatabaseStatus::Connected);
    }
}
