//! Application state for the CommunityConnect HTTP server.

use crate::services::{AnnouncementBoard, DiscussionService, EventService};
use community_connect_core::environment::Clock;
use community_connect_core::store::{DiscussionStore, EventStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// It's cloned (cheaply, every service holds `Arc`s) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Events and their RSVP ledgers
    pub events: EventService,
    /// Discussion threads
    pub discussions: DiscussionService,
    /// In-process announcement board
    pub announcements: AnnouncementBoard,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(
        events: EventService,
        discussions: DiscussionService,
        announcements: AnnouncementBoard,
    ) -> Self {
        Self {
            events,
            discussions,
            announcements,
        }
    }

    /// Wire every service over the given stores and clock.
    #[must_use]
    pub fn from_stores(
        event_store: Arc<dyn EventStore>,
        discussion_store: Arc<dyn DiscussionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            EventService::new(event_store, Arc::clone(&clock)),
            DiscussionService::new(discussion_store, Arc::clone(&clock)),
            AnnouncementBoard::new(clock),
        )
    }
}
