//! Application services.
//!
//! Each service is the imperative shell around one part of the domain:
//! it parses path ids, calls the pure core, persists through a store trait
//! object and records metrics. HTTP concerns stay in [`crate::api`].

pub mod announcements;
pub mod discussions;
pub mod events;

pub use announcements::AnnouncementBoard;
pub use discussions::DiscussionService;
pub use events::EventService;
