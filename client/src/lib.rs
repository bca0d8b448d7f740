//! # CommunityConnect Client
//!
//! HTTP client for the portal backend, used by front ends and tools.
//!
//! The client keeps the portal usable when the backend is not: listings fall
//! back to built-in sample data, and an RSVP that cannot be stored is applied
//! to the caller's copy of the event with the same ledger rule the server
//! uses. Such RSVPs are reported as [`RsvpOutcome::LocalOnly`] and are not
//! durable. An announcement the backend would not delete is likewise dropped
//! from the caller's list only ([`AnnouncementRemoval::LocalOnly`]).
//!
//! Admin-only actions are checked against the [`Session`](community_connect_core::Session)
//! before any request is sent.
//!
//! ## Example
//!
//! ```ignore
//! use community_connect_client::{CommunityClient, RsvpOutcome};
//! use community_connect_core::{RsvpResponse, Session};
//!
//! let client = CommunityClient::new("http://localhost:5001", Session::guest());
//! let (events, _source) = client.events().await;
//! match client.rsvp(&events[0], RsvpResponse::Yes).await {
//!     RsvpOutcome::Recorded(event) => println!("saved: {}", event.title),
//!     RsvpOutcome::LocalOnly(event) => println!("offline: {}", event.title),
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{AnnouncementRemoval, CommunityClient, EventSource, RsvpOutcome};
pub use error::ClientError;
