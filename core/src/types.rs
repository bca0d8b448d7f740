//! Domain types for the community portal.
//!
//! Events carry their participant ledger inline, discussions carry their
//! replies inline. Both are stored as whole documents and share a single
//! lifetime with their embedded children.

use crate::error::ServiceError;
use crate::ledger::{self, LedgerError, RsvpSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Author recorded when a discussion or reply is posted without one.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Category given to announcements posted without one.
pub const DEFAULT_ANNOUNCEMENT_CATEGORY: &str = "General";

/// Author given to announcements posted without one.
pub const DEFAULT_ANNOUNCEMENT_AUTHOR: &str = "Admin";

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from a UUID
            #[must_use]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the inner UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for an event
    EventId
);

uuid_id!(
    /// Unique identifier for a discussion thread
    DiscussionId
);

uuid_id!(
    /// Unique identifier for a reply inside a discussion
    ReplyId
);

// ============================================================================
// RSVP
// ============================================================================

/// A participant's attendance answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpResponse {
    /// Attending
    Yes,
    /// Not attending
    No,
    /// Undecided
    Maybe,
}

impl RsvpResponse {
    /// Every accepted response, in display order.
    pub const ALL: [Self; 3] = [Self::Yes, Self::Maybe, Self::No];

    /// Wire representation of the response.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Maybe => "maybe",
        }
    }
}

impl fmt::Display for RsvpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpResponse {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "maybe" => Ok(Self::Maybe),
            other => Err(LedgerError::InvalidResponse(other.to_string())),
        }
    }
}

/// One user's current response to an event.
///
/// `username` is copied when the response is recorded and never re-resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Opaque, client-supplied user identity
    pub user_id: String,
    /// Display label at response time
    pub username: String,
    /// The response value
    pub response: RsvpResponse,
    /// When the response was recorded
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl Participant {
    /// Creates a participant entry
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        response: RsvpResponse,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            response,
            date,
        }
    }

    /// Compares every field except `date`.
    #[must_use]
    pub fn same_response_as(&self, other: &Self) -> bool {
        self.user_id == other.user_id
            && self.username == other.username
            && self.response == other.response
    }
}

// ============================================================================
// Events
// ============================================================================

/// A scheduled community event with its participant ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: EventId,
    /// Event title
    pub title: String,
    /// Event description
    pub description: String,
    /// Calendar date of the event
    #[serde(with = "calendar_date")]
    pub date: DateTime<Utc>,
    /// Free-form start time, e.g. `"6:00 PM"`
    pub time: String,
    /// Where the event takes place
    pub location: String,
    /// Participant ledger, at most one entry per `user_id`
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// When the event was created
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Replaces any earlier response from `user_id` with a fresh one.
    pub fn record_rsvp(
        &mut self,
        user_id: &str,
        username: &str,
        response: RsvpResponse,
        now: DateTime<Utc>,
    ) {
        self.participants =
            ledger::apply_response(&self.participants, user_id, username, response, now);
    }

    /// Response counts over the current ledger.
    #[must_use]
    pub fn summary(&self) -> RsvpSummary {
        RsvpSummary::from_participants(&self.participants)
    }
}

/// Body of an RSVP submission.
///
/// `response` stays a raw string here so that an unknown value is reported
/// as a validation failure instead of a decoding failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    /// One of `yes`, `no`, `maybe`
    pub response: String,
    /// Client-supplied identity, trusted as is
    pub user_id: String,
    /// Display label to record
    pub username: String,
}

impl RsvpRequest {
    /// Builds a request from a typed response.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, response: RsvpResponse) -> Self {
        Self {
            response: response.as_str().to_string(),
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    /// Parses the response value and checks the identity is present.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for an unknown response or a
    /// blank `userId` or `username`.
    pub fn parsed_response(&self) -> Result<RsvpResponse, ServiceError> {
        if self.user_id.trim().is_empty() {
            return Err(ServiceError::Validation("userId is required".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(ServiceError::Validation("username is required".to_string()));
        }
        Ok(self.response.parse::<RsvpResponse>()?)
    }
}

/// Payload for creating an event.
///
/// Every descriptive field is optional at the type level so that a missing
/// field is reported as a validation error rather than a decoding failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Event title
    #[serde(default)]
    pub title: Option<String>,
    /// Event description
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date, RFC 3339 or `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Free-form start time
    #[serde(default)]
    pub time: Option<String>,
    /// Where the event takes place
    #[serde(default)]
    pub location: Option<String>,
    /// Seeded participant ledger
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl NewEvent {
    /// Validates the payload and builds the event it describes.
    ///
    /// A seeded ledger is collapsed to one entry per user (last one wins) so
    /// that the ledger invariant holds from creation.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] listing every missing or blank
    /// required field, or an unparseable date.
    pub fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> Result<Event, ServiceError> {
        let mut problems = Vec::new();

        let title = required("title", self.title, &mut problems);
        let description = required("description", self.description, &mut problems);
        let raw_date = required("date", self.date, &mut problems);
        let time = required("time", self.time, &mut problems);
        let location = required("location", self.location, &mut problems);

        let date = if raw_date.is_empty() {
            None
        } else {
            let parsed = calendar_date::parse(&raw_date);
            if parsed.is_none() {
                problems.push(format!("date `{raw_date}` is not a valid date"));
            }
            parsed
        };

        match date {
            Some(date) if problems.is_empty() => {
                let participants = self.participants.into_iter().fold(Vec::new(), |acc, p| {
                    ledger::apply_response(&acc, &p.user_id, &p.username, p.response, p.date)
                });

                Ok(Event {
                    id,
                    title,
                    description,
                    date,
                    time,
                    location,
                    participants,
                    created_at,
                })
            }
            _ => Err(ServiceError::Validation(format!(
                "Event validation failed: {}",
                problems.join(", ")
            ))),
        }
    }
}

fn required(field: &str, value: Option<String>, problems: &mut Vec<String>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            problems.push(format!("{field} is required"));
            String::new()
        }
    }
}

/// Event dates are accepted either as full timestamps or as bare calendar days.
pub(crate) mod calendar_date {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }
}

// ============================================================================
// Discussions
// ============================================================================

/// A reply posted to a discussion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: ReplyId,
    /// Reply body
    pub text: String,
    /// Who posted it
    pub author: String,
    /// When it was posted
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

/// A discussion thread and its replies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// Unique identifier
    #[serde(rename = "_id")]
    pub id: DiscussionId,
    /// Topic title
    pub title: String,
    /// Who opened the thread
    pub author: String,
    /// Replies in posting order
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// When the thread was opened
    pub created_at: DateTime<Utc>,
}

impl Discussion {
    /// Appends a reply.
    pub fn push_reply(&mut self, reply: Reply) {
        self.replies.push(reply);
    }

    /// Removes a reply by id, returning it if it was present.
    pub fn remove_reply(&mut self, reply_id: &ReplyId) -> Option<Reply> {
        let index = self.replies.iter().position(|reply| reply.id == *reply_id)?;
        Some(self.replies.remove(index))
    }
}

/// Payload for opening a discussion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscussion {
    /// Topic title
    #[serde(default)]
    pub title: Option<String>,
    /// Who opens the thread, defaults to [`ANONYMOUS_AUTHOR`]
    #[serde(default)]
    pub author: Option<String>,
}

impl NewDiscussion {
    /// Validates the payload and builds the discussion.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the title is missing or blank.
    pub fn into_discussion(
        self,
        id: DiscussionId,
        created_at: DateTime<Utc>,
    ) -> Result<Discussion, ServiceError> {
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::Validation("Discussion validation failed: title is required".into())
            })?;

        Ok(Discussion {
            id,
            title,
            author: author_or_anonymous(self.author),
            replies: Vec::new(),
            created_at,
        })
    }
}

/// Payload for replying to a discussion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReply {
    /// Reply body
    #[serde(default)]
    pub text: Option<String>,
    /// Who replies, defaults to [`ANONYMOUS_AUTHOR`]
    #[serde(default)]
    pub author: Option<String>,
}

impl NewReply {
    /// Validates the payload and builds the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the text is missing or blank.
    pub fn into_reply(self, id: ReplyId, date: DateTime<Utc>) -> Result<Reply, ServiceError> {
        let text = self
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ServiceError::Validation("Reply validation failed: text is required".into()))?;

        Ok(Reply {
            id,
            text,
            author: author_or_anonymous(self.author),
            date,
        })
    }
}

fn author_or_anonymous(author: Option<String>) -> String {
    author
        .filter(|author| !author.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string())
}

// ============================================================================
// Announcements
// ============================================================================

/// A notice posted to the announcement board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Identifier, the creation time in milliseconds for posted announcements
    #[serde(rename = "_id")]
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Category label such as `"Maintenance"`
    pub category: String,
    /// Who posted it
    pub author: String,
    /// Date the announcement refers to
    pub date: DateTime<Utc>,
    /// When it was posted
    pub created_at: DateTime<Utc>,
}

/// Payload for posting an announcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Body text
    #[serde(default)]
    pub description: String,
    /// Category label
    #[serde(default = "default_category")]
    pub category: String,
    /// Who posts it
    #[serde(default = "default_announcement_author")]
    pub author: String,
}

impl NewAnnouncement {
    /// Builds the announcement, stamping both dates with `now`.
    #[must_use]
    pub fn into_announcement(self, id: String, now: DateTime<Utc>) -> Announcement {
        Announcement {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            author: self.author,
            date: now,
            created_at: now,
        }
    }
}

fn default_category() -> String {
    DEFAULT_ANNOUNCEMENT_CATEGORY.to_string()
}

fn default_announcement_author() -> String {
    DEFAULT_ANNOUNCEMENT_AUTHOR.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 12, 12, 0, 0).unwrap()
    }

    fn complete_new_event() -> NewEvent {
        NewEvent {
            title: Some("Yoga Session".to_string()),
            description: Some("Morning yoga".to_string()),
            date: Some("2024-01-25".to_string()),
            time: Some("7:00 AM".to_string()),
            location: Some("Central Park".to_string()),
            participants: Vec::new(),
        }
    }

    #[test]
    fn rsvp_response_parses_only_known_values() {
        assert_eq!("yes".parse::<RsvpResponse>().unwrap(), RsvpResponse::Yes);
        assert_eq!("no".parse::<RsvpResponse>().unwrap(), RsvpResponse::No);
        assert_eq!("maybe".parse::<RsvpResponse>().unwrap(), RsvpResponse::Maybe);

        let err = "attending".parse::<RsvpResponse>().unwrap_err();
        assert_eq!(err, LedgerError::InvalidResponse("attending".to_string()));
        assert!("YES".parse::<RsvpResponse>().is_err());
    }

    #[test]
    fn rsvp_request_validates_response_and_identity() {
        let request: RsvpRequest =
            serde_json::from_str(r#"{"response":"maybe","userId":"u1","username":"Alice"}"#)
                .unwrap();
        assert_eq!(request.parsed_response().unwrap(), RsvpResponse::Maybe);

        let bad = RsvpRequest {
            response: "sure".to_string(),
            ..request.clone()
        };
        assert!(matches!(bad.parsed_response(), Err(ServiceError::Validation(_))));

        let anonymous = RsvpRequest {
            user_id: " ".to_string(),
            ..request.clone()
        };
        assert!(matches!(anonymous.parsed_response(), Err(ServiceError::Validation(m)) if m.contains("userId")));

        let nameless = RsvpRequest {
            username: "   ".to_string(),
            ..request
        };
        assert!(matches!(nameless.parsed_response(), Err(ServiceError::Validation(m)) if m == "username is required"));
    }

    #[test]
    fn participant_uses_camel_case_on_the_wire() {
        let participant = Participant::new("u1", "Alice", RsvpResponse::Yes, noon());
        let json = serde_json::to_value(&participant).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["username"], "Alice");
        assert_eq!(json["response"], "yes");
    }

    #[test]
    fn participant_without_date_defaults_to_now() {
        let before = Utc::now();
        let participant: Participant =
            serde_json::from_str(r#"{"userId":"1","username":"John Doe","response":"maybe"}"#)
                .unwrap();

        assert_eq!(participant.response, RsvpResponse::Maybe);
        assert!(participant.date >= before);
    }

    #[test]
    fn event_serializes_id_as_underscore_id() {
        let event = complete_new_event()
            .into_event(EventId::new(), noon())
            .unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["_id"], event.id.to_string());
        assert_eq!(json["date"], "2024-01-25T00:00:00.000Z");
        assert!(json["createdAt"].is_string());

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn new_event_reports_every_missing_field() {
        let err = NewEvent {
            title: Some("  ".to_string()),
            ..NewEvent::default()
        }
        .into_event(EventId::new(), noon())
        .unwrap_err();

        let ServiceError::Validation(message) = err else {
            panic!("expected validation error");
        };
        for field in ["title", "description", "date", "time", "location"] {
            assert!(message.contains(&format!("{field} is required")), "{message}");
        }
    }

    #[test]
    fn new_event_rejects_unparseable_date() {
        let err = NewEvent {
            date: Some("next tuesday".to_string()),
            ..complete_new_event()
        }
        .into_event(EventId::new(), noon())
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(m) if m.contains("not a valid date")));
    }

    #[test]
    fn new_event_collapses_duplicate_seeded_participants() {
        let event = NewEvent {
            participants: vec![
                Participant::new("1", "John Doe", RsvpResponse::Yes, noon()),
                Participant::new("2", "Jane Smith", RsvpResponse::Yes, noon()),
                Participant::new("1", "John Doe", RsvpResponse::No, noon()),
            ],
            ..complete_new_event()
        }
        .into_event(EventId::new(), noon())
        .unwrap();

        assert_eq!(event.participants.len(), 2);
        assert_eq!(event.participants[0].user_id, "2");
        assert_eq!(event.participants[1].response, RsvpResponse::No);
    }

    #[test]
    fn calendar_date_accepts_timestamps_and_days() {
        assert_eq!(
            calendar_date::parse("2024-11-12T12:00:00Z"),
            Some(noon())
        );
        assert_eq!(
            calendar_date::parse("2024-11-12"),
            Some(Utc.with_ymd_and_hms(2024, 11, 12, 0, 0, 0).unwrap())
        );
        assert_eq!(calendar_date::parse("12/11/2024"), None);
    }

    #[test]
    fn discussion_author_defaults_to_anonymous() {
        let discussion = NewDiscussion {
            title: Some("Parking".to_string()),
            author: None,
        }
        .into_discussion(DiscussionId::new(), noon())
        .unwrap();

        assert_eq!(discussion.author, ANONYMOUS_AUTHOR);
        assert!(discussion.replies.is_empty());
    }

    #[test]
    fn discussion_requires_title() {
        let err = NewDiscussion::default()
            .into_discussion(DiscussionId::new(), noon())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn reply_requires_text() {
        let err = NewReply {
            text: Some(String::new()),
            author: Some("Bob".to_string()),
        }
        .into_reply(ReplyId::new(), noon())
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn remove_reply_keeps_other_replies_in_order() {
        let mut discussion = NewDiscussion {
            title: Some("Parking".to_string()),
            author: Some("Alice".to_string()),
        }
        .into_discussion(DiscussionId::new(), noon())
        .unwrap();

        let replies: Vec<Reply> = ["first", "second", "third"]
            .into_iter()
            .map(|text| {
                NewReply {
                    text: Some(text.to_string()),
                    author: None,
                }
                .into_reply(ReplyId::new(), noon())
                .unwrap()
            })
            .collect();
        for reply in &replies {
            discussion.push_reply(reply.clone());
        }

        let removed = discussion.remove_reply(&replies[1].id).unwrap();
        assert_eq!(removed.text, "second");
        assert_eq!(discussion.replies.len(), 2);
        assert_eq!(discussion.replies[0].text, "first");
        assert_eq!(discussion.replies[1].text, "third");

        assert!(discussion.remove_reply(&ReplyId::new()).is_none());
    }

    #[test]
    fn new_announcement_fills_defaults() {
        let new: NewAnnouncement =
            serde_json::from_str(r#"{"title":"Gym closed","description":"Repairs"}"#).unwrap();
        assert_eq!(new.category, DEFAULT_ANNOUNCEMENT_CATEGORY);
        assert_eq!(new.author, DEFAULT_ANNOUNCEMENT_AUTHOR);

        let announcement = new.into_announcement("42".to_string(), noon());
        assert_eq!(announcement.id, "42");
        assert_eq!(announcement.date, announcement.created_at);
    }
}
