//! # CommunityConnect Core
//!
//! Domain types and the RSVP ledger for the CommunityConnect community portal.
//!
//! The crate is the functional core of the workspace: nothing in here performs
//! I/O. Persistence sits behind the traits in [`store`], and time is injected
//! through [`environment::Clock`], so every rule can be tested at memory speed.
//!
//! ## Core Concepts
//!
//! - **Event**: a scheduled community gathering carrying its participant ledger
//! - **Participant**: one user's current RSVP to an event
//! - **Ledger**: the ordered participant sequence; at most one entry per user
//! - **Reconciliation**: remove-by-key then append, see [`ledger::apply_response`]
//!
//! ## Example
//!
//! ```
//! use community_connect_core::ledger::{apply_response, count_by_response};
//! use community_connect_core::types::RsvpResponse;
//! use chrono::Utc;
//!
//! let ledger = apply_response(&[], "u1", "Alice", RsvpResponse::Yes, Utc::now());
//! let ledger = apply_response(&ledger, "u1", "Alice", RsvpResponse::Maybe, Utc::now());
//!
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(count_by_response(&ledger, RsvpResponse::Maybe), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod error;
pub mod ledger;
pub mod samples;
pub mod session;
pub mod store;
pub mod types;

pub use error::ServiceError;
pub use ledger::{LedgerError, RsvpSummary};
pub use session::Session;
pub use store::{DiscussionStore, EventStore, StoreError};
pub use types::{
    Announcement, Discussion, DiscussionId, Event, EventId, NewAnnouncement, NewDiscussion,
    NewEvent, NewReply, Participant, Reply, ReplyId, RsvpRequest, RsvpResponse,
};

/// Environment module - injected dependencies
///
/// Operations that need the current time take it from a [`Clock`](environment::Clock)
/// rather than calling `Utc::now()` directly, so tests can pin it.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use community_connect_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{Clock, SystemClock};

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
