//! RSVP ledger: reconciliation and aggregation over an event's participants.
//!
//! The ledger holds at most one response per `user_id`. That invariant is
//! maintained by [`apply_response`] alone; stores do not enforce uniqueness.
//!
//! All functions here are pure. Aggregations are recomputed from the
//! sequence on every call and must not be cached, since the ledger can change
//! between reads.

use crate::types::{Participant, RsvpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while interpreting RSVP input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The response is not one of `yes`, `no` or `maybe`.
    #[error("Invalid RSVP response `{0}`: expected one of yes, no, maybe")]
    InvalidResponse(String),
}

/// Replaces `user_id`'s response in the ledger.
///
/// Returns a new sequence equal to `participants` with any entry for
/// `user_id` removed, followed by a fresh entry stamped with `now`. Every
/// other entry keeps its value and relative order. A user with no previous
/// entry is the ordinary first-RSVP case, not an error.
///
/// Replaying an identical call yields the same ledger except for the
/// advanced `date`; compare with [`same_ledger`] when that matters.
///
/// # Example
///
/// ```
/// use community_connect_core::ledger::apply_response;
/// use community_connect_core::types::{Participant, RsvpResponse};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let ledger = vec![Participant::new("u1", "Alice", RsvpResponse::Yes, now)];
/// let ledger = apply_response(&ledger, "u1", "Alice", RsvpResponse::Maybe, now);
///
/// assert_eq!(ledger, vec![Participant::new("u1", "Alice", RsvpResponse::Maybe, now)]);
/// ```
#[must_use]
pub fn apply_response(
    participants: &[Participant],
    user_id: &str,
    username: &str,
    response: RsvpResponse,
    now: DateTime<Utc>,
) -> Vec<Participant> {
    let mut next: Vec<Participant> = participants
        .iter()
        .filter(|participant| participant.user_id != user_id)
        .cloned()
        .collect();

    next.push(Participant::new(user_id, username, response, now));
    next
}

/// Like [`apply_response`], but takes the response as raw input.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidResponse`] for anything other than
/// `yes`, `no` or `maybe`. The ledger is not touched in that case.
pub fn apply_response_str(
    participants: &[Participant],
    user_id: &str,
    username: &str,
    response: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Participant>, LedgerError> {
    let response = response.parse::<RsvpResponse>()?;
    Ok(apply_response(participants, user_id, username, response, now))
}

/// Number of participants whose response equals `response`.
#[must_use]
pub fn count_by_response(participants: &[Participant], response: RsvpResponse) -> usize {
    participants
        .iter()
        .filter(|participant| participant.response == response)
        .count()
}

/// Participants whose response equals `response`, in ledger order.
#[must_use]
pub fn participants_with_response(
    participants: &[Participant],
    response: RsvpResponse,
) -> Vec<&Participant> {
    participants
        .iter()
        .filter(|participant| participant.response == response)
        .collect()
}

/// The current response of `user_id`, if they have one.
#[must_use]
pub fn response_of(participants: &[Participant], user_id: &str) -> Option<RsvpResponse> {
    participants
        .iter()
        .find(|participant| participant.user_id == user_id)
        .map(|participant| participant.response)
}

/// Compares two ledgers entry by entry, ignoring `date`.
#[must_use]
pub fn same_ledger(left: &[Participant], right: &[Participant]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(a, b)| a.same_response_as(b))
}

/// Response counts for one ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSummary {
    /// Participants answering `yes`
    pub yes: usize,
    /// Participants answering `maybe`
    pub maybe: usize,
    /// Participants answering `no`
    pub no: usize,
}

impl RsvpSummary {
    /// Counts responses in a single pass.
    #[must_use]
    pub fn from_participants(participants: &[Participant]) -> Self {
        participants
            .iter()
            .fold(Self::default(), |mut summary, participant| {
                match participant.response {
                    RsvpResponse::Yes => summary.yes += 1,
                    RsvpResponse::Maybe => summary.maybe += 1,
                    RsvpResponse::No => summary.no += 1,
                }
                summary
            })
    }

    /// Count for one response value.
    #[must_use]
    pub const fn count(&self, response: RsvpResponse) -> usize {
        match response {
            RsvpResponse::Yes => self.yes,
            RsvpResponse::Maybe => self.maybe,
            RsvpResponse::No => self.no,
        }
    }

    /// Total number of responses.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.yes + self.maybe + self.no
    }
}
