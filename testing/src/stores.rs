//! In-memory document stores
//!
//! Fast, deterministic implementations of the store traits:
//! - [`InMemoryEventStore`]: events with their participant ledgers
//! - [`InMemoryDiscussionStore`]: discussions with their replies
//!
//! Both keep documents in insertion order behind a `tokio` `RwLock`, and both
//! can be switched offline with `set_available(false)` so that tests can
//! exercise persistence failures without a real database.

use community_connect_core::store::{DiscussionStore, EventStore, StoreError, StoreFuture};
use community_connect_core::types::{Discussion, DiscussionId, Event, EventId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

fn offline() -> StoreError {
    StoreError::Unavailable("in-memory store is offline".to_string())
}

/// Availability switch shared by clones of a store.
#[derive(Debug)]
struct Switch(AtomicBool);

impl Switch {
    fn new() -> Arc<Self> {
        Arc::new(Self(AtomicBool::new(true)))
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.0.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(offline())
        }
    }

    fn set(&self, available: bool) {
        tracing::debug!(available, "In-memory store availability changed");
        self.0.store(available, Ordering::SeqCst);
    }
}

/// In-memory event store.
///
/// Clones share the same documents.
///
/// # Example
///
/// ```
/// use community_connect_testing::InMemoryEventStore;
/// use community_connect_core::store::EventStore;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryEventStore::new();
/// store.set_available(false);
/// assert!(store.find_all().await.is_err());
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<Event>>>,
    available: Arc<Switch>,
}

impl InMemoryEventStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            available: Switch::new(),
        }
    }

    /// Create a store pre-populated with `events`
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
            available: Switch::new(),
        }
    }

    /// Take the store offline (`false`) or back online (`true`).
    ///
    /// While offline every operation fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upsert_event(events: &mut Vec<Event>, event: Event) {
    match events.iter_mut().find(|stored| stored.id == event.id) {
        Some(stored) => *stored = event,
        None => events.push(event),
    }
}

impl EventStore for InMemoryEventStore {
    fn find_by_id(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            self.available.check()?;
            let events = self.events.read().await;
            Ok(events.iter().find(|event| event.id == id).cloned())
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            self.available.check()?;
            let mut events = self.events.read().await.clone();
            // Stable: events on the same day stay in insertion order
            events.sort_by_key(|event| event.date);
            Ok(events)
        })
    }

    fn insert(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            self.available.check()?;
            let mut events = self.events.write().await;
            if events.iter().any(|stored| stored.id == event.id) {
                return Err(StoreError::DatabaseError(format!(
                    "duplicate event id {}",
                    event.id
                )));
            }
            events.push(event.clone());
            Ok(event)
        })
    }

    fn insert_many(&self, batch: Vec<Event>) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            self.available.check()?;
            let mut events = self.events.write().await;
            for event in &batch {
                upsert_event(&mut events, event.clone());
            }
            Ok(batch)
        })
    }

    fn save(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            self.available.check()?;
            let mut events = self.events.write().await;
            let stored = events
                .iter_mut()
                .find(|stored| stored.id == event.id)
                .ok_or_else(|| StoreError::Missing(format!("event {}", event.id)))?;
            *stored = event.clone();
            Ok(event)
        })
    }

    fn delete_all(&self) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            self.available.check()?;
            let mut events = self.events.write().await;
            let removed = events.len() as u64;
            events.clear();
            Ok(removed)
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.available.check() })
    }
}

/// In-memory discussion store.
///
/// Clones share the same documents.
#[derive(Clone, Debug)]
pub struct InMemoryDiscussionStore {
    discussions: Arc<RwLock<Vec<Discussion>>>,
    available: Arc<Switch>,
}

impl InMemoryDiscussionStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            discussions: Arc::new(RwLock::new(Vec::new())),
            available: Switch::new(),
        }
    }

    /// Take the store offline (`false`) or back online (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Number of stored discussions
    pub async fn len(&self) -> usize {
        self.discussions.read().await.len()
    }
}

impl Default for InMemoryDiscussionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscussionStore for InMemoryDiscussionStore {
    fn find_by_id(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>> {
        Box::pin(async move {
            self.available.check()?;
            let discussions = self.discussions.read().await;
            Ok(discussions.iter().find(|d| d.id == id).cloned())
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Discussion>> {
        Box::pin(async move {
            self.available.check()?;
            let mut discussions = self.discussions.read().await.clone();
            discussions.reverse();
            discussions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(discussions)
        })
    }

    fn insert(&self, discussion: Discussion) -> StoreFuture<'_, Discussion> {
        Box::pin(async move {
            self.available.check()?;
            let mut discussions = self.discussions.write().await;
            if discussions.iter().any(|d| d.id == discussion.id) {
                return Err(StoreError::DatabaseError(format!(
                    "duplicate discussion id {}",
                    discussion.id
                )));
            }
            discussions.push(discussion.clone());
            Ok(discussion)
        })
    }

    fn save(&self, discussion: Discussion) -> StoreFuture<'_, Discussion> {
        Box::pin(async move {
            self.available.check()?;
            let mut discussions = self.discussions.write().await;
            let stored = discussions
                .iter_mut()
                .find(|d| d.id == discussion.id)
                .ok_or_else(|| StoreError::Missing(format!("discussion {}", discussion.id)))?;
            *stored = discussion.clone();
            Ok(discussion)
        })
    }

    fn delete(&self, id: DiscussionId) -> StoreFuture<'_, Option<Discussion>> {
        Box::pin(async move {
            self.available.check()?;
            let mut discussions = self.discussions.write().await;
            let removed = discussions
                .iter()
                .position(|d| d.id == id)
                .map(|index| discussions.remove(index));
            Ok(removed)
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.available.check() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::test_clock;
    use chrono::Duration;
    use community_connect_core::environment::Clock;
    use community_connect_core::samples::{sample_events, seed_events};
    use community_connect_core::types::{NewDiscussion, RsvpResponse};

    fn discussion(title: &str, minutes: i64) -> Discussion {
        NewDiscussion {
            title: Some(title.to_string()),
            author: None,
        }
        .into_discussion(
            DiscussionId::new(),
            test_clock().now() + Duration::minutes(minutes),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn find_all_orders_events_by_date() {
        let store = InMemoryEventStore::new();
        // Diwali (November) is inserted before Yoga and Cleanup (January, February)
        store.insert_many(sample_events(test_clock().now())).await.unwrap();

        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Yoga Session",
                "Neighborhood Cleanup",
                "Community Diwali Celebration"
            ]
        );
    }

    #[tokio::test]
    async fn save_overwrites_the_whole_ledger() {
        let store = InMemoryEventStore::new();
        let mut event = seed_events(test_clock().now()).remove(0);
        store.insert(event.clone()).await.unwrap();

        event.record_rsvp("1", "John Doe", RsvpResponse::No, test_clock().now());
        store.save(event.clone()).await.unwrap();

        let stored = store.find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(stored.participants, event.participants);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_after_delete_all_does_not_recreate_the_event() {
        let seeded = seed_events(test_clock().now());
        let store = InMemoryEventStore::with_events(seeded.clone());
        let mut event = store.find_by_id(seeded[0].id).await.unwrap().unwrap();

        store.delete_all().await.unwrap();
        event.record_rsvp("u1", "Alice", RsvpResponse::Yes, test_clock().now());

        let err = store.save(event.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
        assert_eq!(store.find_by_id(event.id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryEventStore::new();
        let event = seed_events(test_clock().now()).remove(0);
        store.insert(event.clone()).await.unwrap();

        let err = store.insert(event).await.unwrap_err();
        assert!(matches!(err, StoreError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn delete_all_reports_removed_count() {
        let store = InMemoryEventStore::with_events(seed_events(test_clock().now()));
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn offline_store_fails_every_operation() {
        let store = InMemoryEventStore::new();
        store.set_available(false);

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(store.find_by_id(EventId::new()).await.is_err());
        assert!(store.delete_all().await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_documents_and_availability() {
        let store = InMemoryEventStore::new();
        let clone = store.clone();
        clone
            .insert(seed_events(test_clock().now()).remove(0))
            .await
            .unwrap();
        store.set_available(false);

        assert!(clone.ping().await.is_err());
        store.set_available(true);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn discussions_are_listed_newest_first() {
        let store = InMemoryDiscussionStore::new();
        store.insert(discussion("older", 0)).await.unwrap();
        store.insert(discussion("newer", 5)).await.unwrap();

        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn save_of_a_deleted_discussion_is_missing() {
        let store = InMemoryDiscussionStore::new();
        let thread = discussion("parking", 0);
        store.insert(thread.clone()).await.unwrap();
        store.delete(thread.id).await.unwrap();

        let err = store.save(thread.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_discussion() {
        let store = InMemoryDiscussionStore::new();
        let thread = discussion("parking", 0);
        store.insert(thread.clone()).await.unwrap();

        assert_eq!(store.delete(thread.id).await.unwrap(), Some(thread.clone()));
        assert_eq!(store.delete(thread.id).await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }
}
