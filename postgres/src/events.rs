//! Event documents.

use crate::{decode_error, store_error};
use community_connect_core::store::{EventStore, StoreError, StoreFuture};
use community_connect_core::types::{Event, EventId};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// PostgreSQL-backed event store.
///
/// Each row holds one [`Event`] as JSONB, participant ledger included.
#[derive(Clone, Debug)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn encode(event: &Event) -> Result<JsonValue, StoreError> {
    serde_json::to_value(event)
        .map_err(|e| StoreError::SerializationError(format!("Failed to encode event: {e}")))
}

fn decode(data: JsonValue) -> Result<Event, StoreError> {
    serde_json::from_value(data).map_err(|e| decode_error(&e))
}

const UPSERT: &str = "INSERT INTO events (id, event_date, data, created_at)
     VALUES ($1, $2, $3, $4)
     ON CONFLICT (id) DO UPDATE
     SET event_date = EXCLUDED.event_date, data = EXCLUDED.data, updated_at = now()";

impl EventStore for PostgresEventStore {
    fn find_by_id(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            let row: Option<(JsonValue,)> = sqlx::query_as("SELECT data FROM events WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| store_error("Failed to load event", &e))?;

            row.map(|(data,)| decode(data)).transpose()
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let rows: Vec<(JsonValue,)> =
                sqlx::query_as("SELECT data FROM events ORDER BY event_date ASC, seq ASC")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| store_error("Failed to list events", &e))?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        })
    }

    fn insert(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO events (id, event_date, data, created_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(event.id.as_uuid())
            .bind(event.date)
            .bind(encode(&event)?)
            .bind(event.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to insert event", &e))?;

            tracing::debug!(event_id = %event.id, "Event inserted");
            Ok(event)
        })
    }

    fn insert_many(&self, events: Vec<Event>) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| store_error("Failed to begin transaction", &e))?;

            for event in &events {
                sqlx::query(UPSERT)
                    .bind(event.id.as_uuid())
                    .bind(event.date)
                    .bind(encode(event)?)
                    .bind(event.created_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| store_error("Failed to insert event", &e))?;
            }

            tx.commit()
                .await
                .map_err(|e| store_error("Failed to commit events", &e))?;

            tracing::debug!(count = events.len(), "Events inserted");
            Ok(events)
        })
    }

    fn save(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let result = sqlx::query(
                "UPDATE events SET event_date = $2, data = $3, updated_at = now() WHERE id = $1",
            )
            .bind(event.id.as_uuid())
            .bind(event.date)
            .bind(encode(&event)?)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to save event", &e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::Missing(format!("event {}", event.id)));
            }
            Ok(event)
        })
    }

    fn delete_all(&self) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM events")
                .execute(&self.pool)
                .await
                .map_err(|e| store_error("Failed to delete events", &e))?;

            Ok(result.rows_affected())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| store_error("Database unreachable", &e))?;
            Ok(())
        })
    }
}
