//! Property tests for RSVP reconciliation.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use community_connect_core::ledger::{
    apply_response, count_by_response, participants_with_response, response_of, same_ledger,
};
use community_connect_core::types::{Participant, RsvpResponse};
use proptest::prelude::*;
use proptest::test_runner::Config;
use std::collections::HashSet;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, minute % 60, 0).unwrap()
}

fn response() -> impl Strategy<Value = RsvpResponse> {
    prop_oneof![
        Just(RsvpResponse::Yes),
        Just(RsvpResponse::No),
        Just(RsvpResponse::Maybe),
    ]
}

/// Ledgers that already satisfy the one-entry-per-user invariant.
fn ledger() -> impl Strategy<Value = Vec<Participant>> {
    prop::collection::vec(("u[0-9]{1,2}", "[A-Z][a-z]{2,6}", response()), 0..12).prop_map(
        |entries| {
            entries
                .into_iter()
                .fold(Vec::new(), |acc, (user_id, username, response)| {
                    apply_response(&acc, &user_id, &username, response, at(0))
                })
        },
    )
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn exactly_one_entry_for_the_responding_user(
        participants in ledger(),
        user_id in "u[0-9]{1,2}",
        r in response(),
    ) {
        let next = apply_response(&participants, &user_id, "Someone", r, at(1));

        let entries: Vec<&Participant> =
            next.iter().filter(|p| p.user_id == user_id).collect();
        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(entries[0].response, r);
        prop_assert_eq!(response_of(&next, &user_id), Some(r));
    }

    #[test]
    fn user_ids_stay_unique(
        participants in ledger(),
        user_id in "u[0-9]{1,2}",
        r in response(),
    ) {
        let next = apply_response(&participants, &user_id, "Someone", r, at(1));
        let unique: HashSet<&str> = next.iter().map(|p| p.user_id.as_str()).collect();
        prop_assert_eq!(unique.len(), next.len());
    }

    #[test]
    fn other_entries_keep_value_and_order(
        participants in ledger(),
        user_id in "u[0-9]{1,2}",
        r in response(),
    ) {
        let next = apply_response(&participants, &user_id, "Someone", r, at(1));

        let before: Vec<&Participant> =
            participants.iter().filter(|p| p.user_id != user_id).collect();
        let after: Vec<&Participant> =
            next.iter().filter(|p| p.user_id != user_id).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn later_response_collapses_earlier_one(
        participants in ledger(),
        user_id in "u[0-9]{1,2}",
        first in response(),
        second in response(),
    ) {
        let via_first = apply_response(
            &apply_response(&participants, &user_id, "Someone", first, at(1)),
            &user_id,
            "Someone",
            second,
            at(2),
        );
        let direct = apply_response(&participants, &user_id, "Someone", second, at(2));

        prop_assert_eq!(via_first, direct);
    }

    #[test]
    fn repeating_a_response_adds_no_entries(
        participants in ledger(),
        user_id in "u[0-9]{1,2}",
        r in response(),
    ) {
        let once = apply_response(&participants, &user_id, "Someone", r, at(1));
        let twice = apply_response(&once, &user_id, "Someone", r, at(2));

        prop_assert_eq!(once.len(), twice.len());
        prop_assert!(same_ledger(&once, &twice));
    }

    #[test]
    fn count_matches_filter_length(participants in ledger()) {
        for r in RsvpResponse::ALL {
            prop_assert_eq!(
                count_by_response(&participants, r),
                participants_with_response(&participants, r).len()
            );
        }
    }
}
