//! Built-in sample content.
//!
//! The server reseeds the event store from [`seed_events`] on request and
//! serves the announcement board from [`sample_announcements`]. Clients fall
//! back to [`sample_events`] and [`sample_announcements`] when the API cannot
//! be reached.

use crate::ledger;
use crate::types::{Announcement, Event, EventId, Participant, RsvpResponse};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn ledger_of(entries: &[(&str, &str, RsvpResponse)], now: DateTime<Utc>) -> Vec<Participant> {
    entries
        .iter()
        .fold(Vec::new(), |acc, (user_id, username, response)| {
            ledger::apply_response(&acc, user_id, username, *response, now)
        })
}

fn diwali(id: EventId, now: DateTime<Utc>) -> Event {
    Event {
        id,
        title: "Community Diwali Celebration".to_string(),
        description: "Join us for a grand Diwali celebration with lights, fireworks, and \
                      traditional sweets. All residents are welcome!"
            .to_string(),
        date: day(2024, 11, 12),
        time: "6:00 PM".to_string(),
        location: "Community Hall".to_string(),
        participants: ledger_of(
            &[
                ("1", "John Doe", RsvpResponse::Yes),
                ("2", "Jane Smith", RsvpResponse::Yes),
                ("3", "Mike Johnson", RsvpResponse::Maybe),
            ],
            now,
        ),
        created_at: now,
    }
}

fn yoga(id: EventId, now: DateTime<Utc>) -> Event {
    Event {
        id,
        title: "Yoga Session".to_string(),
        description: "Morning yoga session for all age groups. Bring your yoga mats and join \
                      us for a healthy start to the day."
            .to_string(),
        date: day(2024, 1, 25),
        time: "7:00 AM".to_string(),
        location: "Central Park".to_string(),
        participants: ledger_of(
            &[
                ("1", "John Doe", RsvpResponse::Yes),
                ("4", "Sarah Wilson", RsvpResponse::No),
            ],
            now,
        ),
        created_at: now,
    }
}

fn cleanup(id: EventId, now: DateTime<Utc>) -> Event {
    Event {
        id,
        title: "Neighborhood Cleanup".to_string(),
        description: "Let's work together to clean up our neighborhood parks and streets. \
                      Gloves and bags will be provided."
            .to_string(),
        date: day(2024, 2, 15),
        time: "9:00 AM".to_string(),
        location: "Main Street Park".to_string(),
        participants: ledger_of(
            &[
                ("2", "Jane Smith", RsvpResponse::Yes),
                ("5", "Robert Brown", RsvpResponse::Maybe),
            ],
            now,
        ),
        created_at: now,
    }
}

/// Fixed id of the `n`th offline sample event.
#[must_use]
pub const fn sample_event_id(n: u128) -> EventId {
    EventId::from_uuid(Uuid::from_u128(n))
}

/// Events written to the store by a reseed, each with a fresh id.
#[must_use]
pub fn seed_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![diwali(EventId::new(), now), yoga(EventId::new(), now)]
}

/// Events shown when the API is unreachable.
///
/// Ids are fixed so that repeated fallbacks describe the same events.
#[must_use]
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![
        diwali(sample_event_id(1), now),
        yoga(sample_event_id(2), now),
        cleanup(sample_event_id(3), now),
    ]
}

/// Whether `id` belongs to one of the offline sample events.
#[must_use]
pub fn is_sample_event(id: &EventId) -> bool {
    (1..=3).any(|n| sample_event_id(n) == *id)
}

/// The announcements the board starts with.
#[must_use]
pub fn sample_announcements() -> Vec<Announcement> {
    let announcement = |id: &str,
                        title: &str,
                        description: &str,
                        category: &str,
                        date: DateTime<Utc>,
                        created_at: DateTime<Utc>| Announcement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        author: "Admin".to_string(),
        date,
        created_at,
    };

    vec![
        announcement(
            "1",
            "Water Supply Maintenance",
            "Water supply will be interrupted on Saturday from 9 AM to 3 PM for maintenance \
             work. Please store water accordingly.",
            "Maintenance",
            day(2024, 1, 15),
            day(2024, 1, 10),
        ),
        announcement(
            "2",
            "Community Cleanup Drive",
            "Join us for a community cleanup drive this Sunday at 8 AM in the central park. \
             Gloves and bags will be provided.",
            "Event",
            day(2024, 1, 20),
            day(2024, 1, 12),
        ),
        announcement(
            "3",
            "Security System Upgrade",
            "The society security cameras are being upgraded this week. There might be \
             temporary disruptions in CCTV coverage.",
            "Security",
            day(2024, 1, 18),
            day(2024, 1, 14),
        ),
    ]
}
