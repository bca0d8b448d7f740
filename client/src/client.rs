//! Portal API client implementation

use crate::error::ClientError;
use community_connect_core::environment::{Clock, SystemClock};
use community_connect_core::samples::{sample_announcements, sample_events};
use community_connect_core::session::Session;
use community_connect_core::types::{
    Announcement, Discussion, Event, NewAnnouncement, NewDiscussion, NewReply, RsvpRequest,
    RsvpResponse,
};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Where a listing came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSource {
    /// Fetched from the backend
    Api,
    /// Built-in sample data, used when the backend gave nothing usable
    Sample,
}

/// Result of submitting an RSVP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RsvpOutcome {
    /// The backend stored the response; holds its copy of the event
    Recorded(Event),
    /// The backend call failed; the response was applied to the local copy
    /// only and is lost once that copy is dropped
    LocalOnly(Event),
}

impl RsvpOutcome {
    /// The event as the user should now see it.
    #[must_use]
    pub const fn event(&self) -> &Event {
        match self {
            Self::Recorded(event) | Self::LocalOnly(event) => event,
        }
    }

    /// Take the event out of the outcome.
    #[must_use]
    pub fn into_event(self) -> Event {
        match self {
            Self::Recorded(event) | Self::LocalOnly(event) => event,
        }
    }

    /// Whether the backend has the response.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Result of removing an announcement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnouncementRemoval {
    /// The backend removed it; holds the board as fetched afterwards
    Deleted(Vec<Announcement>),
    /// The backend call failed; the announcement was dropped from the
    /// caller's list only and reappears on the next fetch
    LocalOnly(Vec<Announcement>),
}

impl AnnouncementRemoval {
    /// The board as the user should now see it.
    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        match self {
            Self::Deleted(items) | Self::LocalOnly(items) => items,
        }
    }

    /// Take the board out of the outcome.
    #[must_use]
    pub fn into_announcements(self) -> Vec<Announcement> {
        match self {
            Self::Deleted(items) | Self::LocalOnly(items) => items,
        }
    }

    /// Whether the backend removed the announcement.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the portal backend, acting on behalf of one [`Session`].
#[derive(Clone)]
pub struct CommunityClient {
    client: Client,
    base_url: String,
    session: Session,
    clock: Arc<dyn Clock>,
}

impl CommunityClient {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:5001`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for locally recorded RSVPs and sample data.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The session requests are made for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn require_admin(&self, action: &'static str) -> Result<(), ClientError> {
        if self.session.is_admin {
            Ok(())
        } else {
            tracing::debug!(action, "Blocked admin action for non-admin session");
            Err(ClientError::Forbidden(action))
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// All events, or the three sample events if the backend fails or has none.
    pub async fn events(&self) -> (Vec<Event>, EventSource) {
        match self.get_json::<Vec<Event>>("/events").await {
            Ok(events) if !events.is_empty() => (events, EventSource::Api),
            Ok(_) => {
                tracing::info!("No events from backend, showing samples");
                (sample_events(self.clock.now()), EventSource::Sample)
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to load events, showing samples");
                (sample_events(self.clock.now()), EventSource::Sample)
            }
        }
    }

    /// Submit the session user's RSVP for `event`.
    ///
    /// On any failure the same replace-by-key rule is applied to a copy of
    /// `event` so the user still sees their answer.
    pub async fn rsvp(&self, event: &Event, response: RsvpResponse) -> RsvpOutcome {
        let request = RsvpRequest::new(
            self.session.user_id.clone(),
            self.session.username.clone(),
            response,
        );

        match self
            .post_json::<_, Event>(&format!("/events/{}/rsvp", event.id), &request)
            .await
        {
            Ok(updated) => RsvpOutcome::Recorded(updated),
            Err(error) => {
                tracing::warn!(event_id = %event.id, %error, "RSVP not stored, recording locally");
                let mut local = event.clone();
                local.record_rsvp(
                    &self.session.user_id,
                    &self.session.username,
                    response,
                    self.clock.now(),
                );
                RsvpOutcome::LocalOnly(local)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Announcements
    // ------------------------------------------------------------------------

    /// The announcement board, or the sample announcements if the backend fails.
    pub async fn announcements(&self) -> (Vec<Announcement>, EventSource) {
        match self.get_json::<Vec<Announcement>>("/announcements").await {
            Ok(announcements) => (announcements, EventSource::Api),
            Err(error) => {
                tracing::warn!(%error, "Failed to load announcements, showing samples");
                (sample_announcements(), EventSource::Sample)
            }
        }
    }

    /// Post an announcement.
    ///
    /// # Errors
    ///
    /// [`ClientError::Forbidden`] for a non-admin session, otherwise any
    /// request or API failure.
    pub async fn create_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, ClientError> {
        self.require_admin("posting an announcement")?;
        self.post_json("/announcements", announcement).await
    }

    /// Remove announcement `id` from the board the user is looking at.
    ///
    /// On success the board is fetched again. If the backend call fails the
    /// announcement is filtered out of `current` instead.
    ///
    /// # Errors
    ///
    /// [`ClientError::Forbidden`] for a non-admin session. No request is sent.
    pub async fn delete_announcement(
        &self,
        current: &[Announcement],
        id: &str,
    ) -> Result<AnnouncementRemoval, ClientError> {
        self.require_admin("deleting an announcement")?;

        match self.delete(&format!("/announcements/{id}")).await {
            Ok(()) => {
                let (announcements, _) = self.announcements().await;
                Ok(AnnouncementRemoval::Deleted(announcements))
            }
            Err(error) => {
                tracing::warn!(announcement_id = id, %error, "Announcement not deleted, removing locally");
                let remaining = current.iter().filter(|a| a.id != id).cloned().collect();
                Ok(AnnouncementRemoval::LocalOnly(remaining))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Discussions
    // ------------------------------------------------------------------------

    /// All discussion threads, newest first.
    ///
    /// # Errors
    ///
    /// Any request or API failure.
    pub async fn discussions(&self) -> Result<Vec<Discussion>, ClientError> {
        self.get_json("/discussions").await
    }

    /// Open a thread authored by the session user.
    ///
    /// # Errors
    ///
    /// Any request or API failure.
    pub async fn create_discussion(&self, title: &str) -> Result<Discussion, ClientError> {
        let body = NewDiscussion {
            title: Some(title.to_string()),
            author: Some(self.session.username.clone()),
        };
        self.post_json("/discussions", &body).await
    }

    /// Reply to a thread as the session user.
    ///
    /// # Errors
    ///
    /// Any request or API failure.
    pub async fn reply(&self, discussion_id: &str, text: &str) -> Result<Discussion, ClientError> {
        let body = NewReply {
            text: Some(text.to_string()),
            author: Some(self.session.username.clone()),
        };
        self.post_json(&format!("/discussions/{discussion_id}/replies"), &body)
            .await
    }

    /// Delete a whole thread.
    ///
    /// # Errors
    ///
    /// [`ClientError::Forbidden`] for a non-admin session, otherwise any
    /// request or API failure.
    pub async fn delete_discussion(&self, id: &str) -> Result<(), ClientError> {
        self.require_admin("deleting a discussion")?;
        self.delete(&format!("/discussions/{id}")).await
    }

    /// Remove one reply.
    ///
    /// # Errors
    ///
    /// Any request or API failure.
    pub async fn delete_reply(&self, discussion_id: &str, reply_id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/discussions/{discussion_id}/replies/{reply_id}"))
            .await
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.message)
        .unwrap_or(body);
    Err(ClientError::ApiError {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = CommunityClient::new("http://localhost:5001/", Session::guest());
        assert_eq!(client.url("/events"), "http://localhost:5001/api/events");
    }

    #[tokio::test]
    async fn admin_actions_are_refused_without_a_request() {
        // Nothing listens on port 9; a request would surface as RequestFailed.
        let client = CommunityClient::new("http://127.0.0.1:9", Session::guest());

        let err = client.delete_discussion("abc").await.unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
        let err = client
            .delete_announcement(&sample_announcements(), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
    }
}
