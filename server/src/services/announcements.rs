//! The announcement board.
//!
//! Announcements live in process memory only. The board starts from the
//! built-in samples on every start and never touches the document stores.

use community_connect_core::environment::Clock;
use community_connect_core::error::ServiceError;
use community_connect_core::samples::sample_announcements;
use community_connect_core::types::{Announcement, NewAnnouncement};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

/// In-process list of announcements, newest posts first.
#[derive(Clone)]
pub struct AnnouncementBoard {
    items: Arc<RwLock<Vec<Announcement>>>,
    clock: Arc<dyn Clock>,
}

impl AnnouncementBoard {
    /// A board holding the three sample announcements.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_announcements(sample_announcements(), clock)
    }

    /// A board holding `announcements`.
    #[must_use]
    pub fn with_announcements(announcements: Vec<Announcement>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items: Arc::new(RwLock::new(announcements)),
            clock,
        }
    }

    /// Current announcements.
    pub async fn list(&self) -> Vec<Announcement> {
        self.items.read().await.clone()
    }

    /// Post an announcement at the top of the board.
    ///
    /// The id is the posting time in milliseconds, bumped until unused.
    #[instrument(skip(self, new_announcement))]
    pub async fn create(&self, new_announcement: NewAnnouncement) -> Announcement {
        let now = self.clock.now();
        let mut items = self.items.write().await;

        let mut millis = now.timestamp_millis();
        while items.iter().any(|a| a.id == millis.to_string()) {
            millis += 1;
        }

        let announcement = new_announcement.into_announcement(millis.to_string(), now);
        items.insert(0, announcement.clone());

        tracing::info!(announcement_id = %announcement.id, "Announcement posted");
        announcement
    }

    /// Remove an announcement.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if no announcement has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Announcement, ServiceError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ServiceError::not_found("Announcement", id))?;

        Ok(items.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use community_connect_core::environment::Clock;
    use community_connect_testing::test_clock;

    fn notice(title: &str) -> NewAnnouncement {
        serde_json::from_value(serde_json::json!({"title": title, "description": "details"})).unwrap()
    }

    #[tokio::test]
    async fn starts_with_samples() {
        let board = AnnouncementBoard::new(Arc::new(test_clock()));
        let ids: Vec<String> = board.list().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn new_posts_go_first_with_millisecond_ids() {
        let board = AnnouncementBoard::new(Arc::new(test_clock()));
        let posted = board.create(notice("Gym closed")).await;

        assert_eq!(posted.id, test_clock().now().timestamp_millis().to_string());
        assert_eq!(posted.category, "General");
        assert_eq!(posted.author, "Admin");
        assert_eq!(board.list().await[0], posted);
    }

    #[tokio::test]
    async fn posts_in_the_same_millisecond_get_distinct_ids() {
        let board = AnnouncementBoard::with_announcements(Vec::new(), Arc::new(test_clock()));
        let first = board.create(notice("one")).await;
        let second = board.create(notice("two")).await;
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let board = AnnouncementBoard::new(Arc::new(test_clock()));
        assert_eq!(board.delete("2").await.unwrap().title, "Community Cleanup Drive");
        assert!(board.delete("2").await.unwrap_err().is_not_found());
        assert_eq!(board.list().await.len(), 2);
    }
}
