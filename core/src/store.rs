//! Document store boundaries for events and discussions.
//!
//! The stores hold whole documents: an event together with its participant
//! ledger, a discussion together with its replies. A single document write is
//! atomic, nothing more. In particular the RSVP cycle (load, reconcile, save)
//! is not protected against concurrent writers, so two simultaneous RSVPs on
//! the same event can lose one of the additions.
//!
//! # Implementations
//!
//! - `PostgresEventStore` / `PostgresDiscussionStore` (in `community-connect-postgres`): JSONB documents
//! - `InMemoryEventStore` / `InMemoryDiscussionStore` (in `community-connect-testing`): fast, deterministic
//!
//! # Dyn Compatibility
//!
//! The traits return `Pin<Box<dyn Future>>` instead of using `async fn` so that
//! the HTTP layer can hold them as `Arc<dyn EventStore>`.
//!
//! # Example
//!
//! ```no_run
//! use community_connect_core::store::{EventStore, StoreError};
//! use community_connect_core::types::{EventId, RsvpResponse};
//! use chrono::Utc;
//!
//! async fn rsvp<S: EventStore + ?Sized>(store: &S, id: EventId) -> Result<(), StoreError> {
//!     if let Some(mut event) = store.find_by_id(id).await? {
//!         event.record_rsvp("u1", "Alice", RsvpResponse::Yes, Utc::now());
//!         store.save(event).await?;
//!     }
//!     Ok(())
//! }
//! ```

use crate::types::{Discussion, DiscussionId, Event, EventId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected or failed the operation.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// An overwrite targeted a document that is no longer stored.
    #[error("Document missing: {0}")]
    Missing(String),
}

/// Persistence for events and their participant ledgers.
pub trait EventStore: Send + Sync {
    /// Load one event.
    ///
    /// Returns `Ok(None)` when no event has this id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `Unavailable`: the store could not be queried
    /// - `SerializationError`: the stored document is malformed
    fn find_by_id(&self, id: EventId) -> StoreFuture<'_, Option<Event>>;

    /// Load every event, ordered by event date ascending.
    ///
    /// # Errors
    ///
    /// Same as [`EventStore::find_by_id`].
    fn find_all(&self) -> StoreFuture<'_, Vec<Event>>;

    /// Insert a new event and return it as persisted.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `Unavailable`: the write failed
    fn insert(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Insert several events at once, used when reseeding.
    ///
    /// # Errors
    ///
    /// Same as [`EventStore::insert`].
    fn insert_many(&self, events: Vec<Event>) -> StoreFuture<'_, Vec<Event>>;

    /// Overwrite an existing event, including its whole participant ledger.
    ///
    /// Never creates a document: an event deleted since it was loaded stays
    /// deleted.
    ///
    /// # Errors
    ///
    /// [`StoreError::Missing`] if the event is no longer stored, otherwise
    /// the same as [`EventStore::insert`].
    fn save(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Remove every event. Only used for bulk reseeding.
    ///
    /// Returns how many events were removed.
    ///
    /// # Errors
    ///
    /// Same as [`EventStore::insert`].
    fn delete_all(&self) -> StoreFuture<'_, u64>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `DatabaseError` when it is not
    fn ping(&self) -> StoreFuture<'_, ()>;
}

/// Persistence for discussion threads and their replies.
pub trait DiscussionStore: Send + Sync {
    /// Load one discussion.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `Unavailable`: the store could not be queried
    /// - `SerializationError`: the stored document is malformed
    fn find_by_id(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>>;

    /// Load every discussion, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`DiscussionStore::find_by_id`].
    fn find_all(&self) -> StoreFuture<'_, Vec<Discussion>>;

    /// Insert a new discussion.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `Unavailable`: the write failed
    fn insert(&self, discussion: Discussion) -> StoreFuture<'_, Discussion>;

    /// Overwrite a stored discussion, including its replies.
    ///
    /// # Errors
    ///
    /// [`StoreError::Missing`] if the discussion is no longer stored,
    /// otherwise the same as [`DiscussionStore::insert`].
    fn save(&self, discussion: Discussion) -> StoreFuture<'_, Discussion>;

    /// Delete a discussion, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Same as [`DiscussionStore::insert`].
    fn delete(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `DatabaseError` when it is not
    fn ping(&self) -> StoreFuture<'_, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_display() {
        let error = StoreError::DatabaseError("relation \"events\" does not exist".to_string());
        assert!(error.to_string().starts_with("Database error"));
    }

    #[test]
    fn unavailable_error_display() {
        let error = StoreError::Unavailable("connection refused".to_string());
        assert_eq!(error.to_string(), "Store unavailable: connection refused");
    }
}
