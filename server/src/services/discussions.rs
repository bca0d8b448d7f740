//! Discussion threads and their replies.

use crate::metrics;
use community_connect_core::environment::Clock;
use community_connect_core::error::ServiceError;
use community_connect_core::store::DiscussionStore;
use community_connect_core::types::{
    Discussion, DiscussionId, NewDiscussion, NewReply, ReplyId,
};
use std::sync::Arc;
use tracing::instrument;

/// Operations on discussion threads.
#[derive(Clone)]
pub struct DiscussionService {
    store: Arc<dyn DiscussionStore>,
    clock: Arc<dyn Clock>,
}

fn discussion_id(raw: &str) -> Result<DiscussionId, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::not_found("Discussion", raw))
}

impl DiscussionService {
    /// Create a service over `store`, stamping times from `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn DiscussionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All discussions, newest first.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Persistence`] if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Discussion>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    /// Open a thread.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if the title is missing
    /// - [`ServiceError::Persistence`] if the write fails
    #[instrument(skip(self, new_discussion))]
    pub async fn create(&self, new_discussion: NewDiscussion) -> Result<Discussion, ServiceError> {
        let discussion = new_discussion.into_discussion(DiscussionId::new(), self.clock.now())?;
        let discussion = self.store.insert(discussion).await?;

        metrics::record_discussion_created();
        tracing::info!(discussion_id = %discussion.id, "Discussion created");
        Ok(discussion)
    }

    async fn load(&self, id: &str) -> Result<Discussion, ServiceError> {
        self.store
            .find_by_id(discussion_id(id)?)
            .await?
            .ok_or_else(|| ServiceError::not_found("Discussion", id))
    }

    /// Append a reply and return the updated thread.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if the text is missing
    /// - [`ServiceError::NotFound`] if the thread does not exist
    /// - [`ServiceError::Persistence`] if the load or save fails
    #[instrument(skip(self, new_reply))]
    pub async fn add_reply(&self, id: &str, new_reply: NewReply) -> Result<Discussion, ServiceError> {
        let reply = new_reply.into_reply(ReplyId::new(), self.clock.now())?;
        let mut discussion = self.load(id).await?;

        discussion.push_reply(reply);
        let discussion = self.store.save(discussion).await?;

        metrics::record_reply_added();
        Ok(discussion)
    }

    /// Delete a thread together with its replies, returning it.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] if the thread does not exist
    /// - [`ServiceError::Persistence`] if the delete fails
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Discussion, ServiceError> {
        let deleted = self
            .store
            .delete(discussion_id(id)?)
            .await?
            .ok_or_else(|| ServiceError::not_found("Discussion", id))?;

        tracing::info!(discussion_id = %deleted.id, "Discussion deleted");
        Ok(deleted)
    }

    /// Remove one reply from a thread.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] if the thread or the reply does not exist
    /// - [`ServiceError::Persistence`] if the load or save fails
    #[instrument(skip(self))]
    pub async fn delete_reply(&self, id: &str, reply_id: &str) -> Result<Discussion, ServiceError> {
        let mut discussion = self.load(id).await?;
        let parsed: ReplyId = reply_id
            .parse()
            .map_err(|_| ServiceError::not_found("Reply", reply_id))?;

        discussion
            .remove_reply(&parsed)
            .ok_or_else(|| ServiceError::not_found("Reply", reply_id))?;

        Ok(self.store.save(discussion).await?)
    }

    /// Whether the store answers.
    pub async fn is_reachable(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}
