//! # CommunityConnect Testing
//!
//! Testing utilities and in-memory infrastructure for CommunityConnect.
//!
//! This crate provides:
//! - [`FixedClock`]: deterministic time
//! - [`InMemoryEventStore`] / [`InMemoryDiscussionStore`]: document stores
//!   backed by process memory, also used by the server's `memory` backend
//! - [`RsvpTest`]: Given-When-Then harness for ledger reconciliation
//!
//! ## Example
//!
//! ```
//! use community_connect_testing::{test_clock, InMemoryEventStore};
//! use community_connect_core::store::EventStore;
//! use community_connect_core::samples::seed_events;
//! use community_connect_core::environment::Clock;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryEventStore::new();
//! store.insert_many(seed_events(test_clock().now())).await?;
//! assert_eq!(store.find_all().await?.len(), 2);
//! # Ok::<(), community_connect_core::StoreError>(())
//! # }).unwrap();
//! ```

pub mod stores;

use chrono::{DateTime, Utc};
use community_connect_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeZone;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use community_connect_testing::mocks::FixedClock;
    /// use community_connect_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use rsvp_test::RsvpTest;
pub use stores::{InMemoryDiscussionStore, InMemoryEventStore};
