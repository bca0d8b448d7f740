//! Business metrics for the CommunityConnect portal.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `community_rsvps_total{response}` - RSVPs recorded, by response value
//! - `community_rsvp_failures_total{kind}` - RSVPs rejected (`not_found`, `validation`, `persistence`)
//! - `community_events_created_total` - Events created (sample reseeds included)
//! - `community_discussions_created_total` - Discussion threads opened
//! - `community_replies_total` - Replies posted
//!
//! Recording is a no-op until a recorder is installed, so services can record
//! unconditionally and tests need no setup.

use community_connect_core::error::ServiceError;
use community_connect_core::types::RsvpResponse;
use metrics::describe_counter;

/// Initialize and register all business metrics descriptions.
///
/// This should be called once at application startup, after the recorder is installed.
pub fn register_business_metrics() {
    describe_counter!(
        "community_rsvps_total",
        "Total number of RSVPs recorded by response (yes, no, maybe)"
    );
    describe_counter!(
        "community_rsvp_failures_total",
        "Total number of RSVPs rejected by failure kind (not_found, validation, persistence)"
    );
    describe_counter!(
        "community_events_created_total",
        "Total number of events created"
    );
    describe_counter!(
        "community_discussions_created_total",
        "Total number of discussion threads opened"
    );
    describe_counter!(
        "community_replies_total",
        "Total number of replies posted to discussions"
    );

    tracing::info!("Business metrics registered");
}

/// Record an accepted RSVP.
pub fn record_rsvp(response: RsvpResponse) {
    metrics::counter!("community_rsvps_total", "response" => response.as_str()).increment(1);
}

/// Record a rejected RSVP.
pub fn record_rsvp_failure(error: &ServiceError) {
    metrics::counter!("community_rsvp_failures_total", "kind" => failure_kind(error)).increment(1);
}

/// Record newly created events.
pub fn record_events_created(count: usize) {
    metrics::counter!("community_events_created_total").increment(count as u64);
}

/// Record a new discussion thread.
pub fn record_discussion_created() {
    metrics::counter!("community_discussions_created_total").increment(1);
}

/// Record a reply.
pub fn record_reply_added() {
    metrics::counter!("community_replies_total").increment(1);
}

/// Label value for a failure.
#[must_use]
pub const fn failure_kind(error: &ServiceError) -> &'static str {
    match error {
        ServiceError::NotFound { .. } => "not_found",
        ServiceError::Validation(_) => "validation",
        ServiceError::Persistence(_) => "persistence",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_connect_core::store::StoreError;

    #[test]
    fn failure_kinds() {
        assert_eq!(failure_kind(&ServiceError::not_found("Event", "x")), "not_found");
        assert_eq!(failure_kind(&ServiceError::Validation(String::new())), "validation");
        assert_eq!(
            failure_kind(&StoreError::Unavailable(String::new()).into()),
            "persistence"
        );
    }

    #[test]
    fn recording_without_recorder_is_harmless() {
        record_rsvp(RsvpResponse::Yes);
        record_rsvp_failure(&ServiceError::not_found("Event", "x"));
        record_events_created(2);
    }
}
