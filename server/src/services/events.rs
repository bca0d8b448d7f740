//! Event listing, creation, reseeding and RSVP recording.

use crate::metrics;
use community_connect_core::environment::Clock;
use community_connect_core::error::ServiceError;
use community_connect_core::samples::seed_events;
use community_connect_core::store::EventStore;
use community_connect_core::types::{Event, EventId, NewEvent, RsvpRequest};
use std::sync::Arc;
use tracing::instrument;

/// Operations on events and their participant ledgers.
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

/// Resolve a path id. Malformed ids cannot name a stored event.
fn event_id(raw: &str) -> Result<EventId, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::not_found("Event", raw))
}

impl EventService {
    /// Create a service over `store`, stamping times from `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All events, earliest date first.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Persistence`] if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    /// One event by id.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] for an unknown or malformed id
    /// - [`ServiceError::Persistence`] if the store cannot be read
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Event, ServiceError> {
        let event_id = event_id(id)?;
        self.store
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", id))
    }

    /// Validate and store a new event.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if a required field is missing
    /// - [`ServiceError::Persistence`] if the write fails
    #[instrument(skip(self, new_event))]
    pub async fn create(&self, new_event: NewEvent) -> Result<Event, ServiceError> {
        let event = new_event.into_event(EventId::new(), self.clock.now())?;
        let event = self.store.insert(event).await?;

        metrics::record_events_created(1);
        tracing::info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }

    /// Record `request` against event `id`, replacing any earlier response
    /// from the same user, and return the whole updated event.
    ///
    /// Load, reconcile and save are separate store calls. Two concurrent
    /// RSVPs on the same event can therefore overwrite each other's entry.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] for an unknown response or blank `userId`
    /// - [`ServiceError::NotFound`] if the event does not exist
    /// - [`ServiceError::Persistence`] if the load or the save fails
    #[instrument(skip(self, request), fields(user_id = %request.user_id, response = %request.response))]
    pub async fn rsvp(&self, id: &str, request: RsvpRequest) -> Result<Event, ServiceError> {
        let result = self.try_rsvp(id, &request).await;
        if let Err(error) = &result {
            metrics::record_rsvp_failure(error);
            tracing::warn!(event_id = %id, error = %error, "RSVP rejected");
        }
        result
    }

    async fn try_rsvp(&self, id: &str, request: &RsvpRequest) -> Result<Event, ServiceError> {
        let response = request.parsed_response()?;
        let mut event = self.get(id).await?;

        event.record_rsvp(&request.user_id, &request.username, response, self.clock.now());
        let event = self.store.save(event).await?;

        metrics::record_rsvp(response);
        tracing::info!(
            event_id = %event.id,
            participants = event.participants.len(),
            "RSVP recorded"
        );
        Ok(event)
    }

    /// Replace every stored event with the two built-in samples.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Persistence`] if clearing or inserting fails.
    #[instrument(skip(self))]
    pub async fn seed_samples(&self) -> Result<Vec<Event>, ServiceError> {
        let removed = self.store.delete_all().await?;
        let events = self.store.insert_many(seed_events(self.clock.now())).await?;

        metrics::record_events_created(events.len());
        tracing::info!(removed, inserted = events.len(), "Sample events seeded");
        Ok(events)
    }

    /// Whether the store answers.
    pub async fn is_reachable(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}
