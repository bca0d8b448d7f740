//! `PostgreSQL` document stores for CommunityConnect.
//!
//! This crate provides PostgreSQL-backed implementations of the
//! [`EventStore`](community_connect_core::store::EventStore) and
//! [`DiscussionStore`](community_connect_core::store::DiscussionStore) traits.
//! Each event or discussion is one JSONB document, so replacing a participant
//! ledger or a reply list is a single-row write.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE events (
//!     id UUID PRIMARY KEY,
//!     seq BIGSERIAL NOT NULL,
//!     event_date TIMESTAMPTZ NOT NULL,
//!     data JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! `discussions` has the same shape without `event_date`. Run [`migrate`]
//! once at startup to create both tables.
//!
//! # Example
//!
//! ```no_run
//! use community_connect_postgres::{PoolSettings, PostgresEventStore, connect, migrate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect("postgres://localhost/community", &PoolSettings::default()).await?;
//! migrate(&pool).await?;
//! let events = PostgresEventStore::from_pool(pool);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod discussions;
mod events;

pub use discussions::PostgresDiscussionStore;
pub use events::PostgresEventStore;

use community_connect_core::store::StoreError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Connection pool sizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long to wait for a connection
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Open a connection pool.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if the database cannot be reached.
pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.connect_timeout)
        .connect(database_url)
        .await
        .map_err(|e| StoreError::Unavailable(format!("Failed to connect: {e}")))
}

/// Create the `events` and `discussions` tables if they don't exist.
///
/// # Errors
///
/// Returns [`StoreError::DatabaseError`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::DatabaseError(format!("Migration failed: {e}")))
}

/// Classify a driver error: connectivity problems become `Unavailable`.
pub(crate) fn store_error(context: &str, error: &sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{context}: {error}"))
        },
        _ => StoreError::DatabaseError(format!("{context}: {error}")),
    }
}

pub(crate) fn decode_error(error: &serde_json::Error) -> StoreError {
    StoreError::SerializationError(format!("Malformed document: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_unavailability() {
        let err = store_error("Failed to load event", &sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn missing_rows_are_database_errors() {
        let err = store_error("Failed to load event", &sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::DatabaseError(m) if m.starts_with("Failed to load event")));
    }

    #[test]
    fn default_pool_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.min_connections, 2);
        assert_eq!(settings.connect_timeout, Duration::from_secs(30));
    }
}
