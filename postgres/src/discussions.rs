//! Discussion documents.

use crate::{decode_error, store_error};
use community_connect_core::store::{DiscussionStore, StoreError, StoreFuture};
use community_connect_core::types::{Discussion, DiscussionId};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// PostgreSQL-backed discussion store.
///
/// Replies live inside the discussion document, so deleting a discussion
/// removes its replies with it.
#[derive(Clone, Debug)]
pub struct PostgresDiscussionStore {
    pool: PgPool,
}

impl PostgresDiscussionStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn encode(discussion: &Discussion) -> Result<JsonValue, StoreError> {
    serde_json::to_value(discussion)
        .map_err(|e| StoreError::SerializationError(format!("Failed to encode discussion: {e}")))
}

fn decode(data: JsonValue) -> Result<Discussion, StoreError> {
    serde_json::from_value(data).map_err(|e| decode_error(&e))
}

impl DiscussionStore for PostgresDiscussionStore {
    fn find_by_id(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>> {
        Box::pin(async move {
            let row: Option<(JsonValue,)> =
                sqlx::query_as("SELECT data FROM discussions WHERE id = $1")
                    .bind(id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| store_error("Failed to load discussion", &e))?;

            row.map(|(data,)| decode(data)).transpose()
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Discussion>> {
        Box::pin(async move {
            let rows: Vec<(JsonValue,)> = sqlx::query_as(
                "SELECT data FROM discussions ORDER BY created_at DESC, seq DESC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to list discussions", &e))?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        })
    }

    fn insert(&self, discussion: Discussion) -> StoreFuture<'_, Discussion> {
        Box::pin(async move {
            sqlx::query("INSERT INTO discussions (id, data, created_at) VALUES ($1, $2, $3)")
                .bind(discussion.id.as_uuid())
                .bind(encode(&discussion)?)
                .bind(discussion.created_at)
                .execute(&self.pool)
                .await
                .map_err(|e| store_error("Failed to insert discussion", &e))?;

            Ok(discussion)
        })
    }

    fn save(&self, discussion: Discussion) -> StoreFuture<'_, Discussion> {
        Box::pin(async move {
            let result =
                sqlx::query("UPDATE discussions SET data = $2, updated_at = now() WHERE id = $1")
                    .bind(discussion.id.as_uuid())
                    .bind(encode(&discussion)?)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| store_error("Failed to save discussion", &e))?;

            if result.rows_affected() == 0 {
                return Err(StoreError::Missing(format!("discussion {}", discussion.id)));
            }
            Ok(discussion)
        })
    }

    fn delete(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>> {
        Box::pin(async move {
            let row: Option<(JsonValue,)> =
                sqlx::query_as("DELETE FROM discussions WHERE id = $1 RETURNING data")
                    .bind(id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| store_error("Failed to delete discussion", &e))?;

            row.map(|(data,)| decode(data)).transpose()
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
