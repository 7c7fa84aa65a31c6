/**
 * Publish Pipeline
 *
 * Turns one "create post" request into a stored post and a best-effort
 * notification, in that order.
 *
 * # Stages
 *
 * ```text
 * Received ──append──▶ Stored ──publish──▶ Broadcast ──▶ Acknowledged
 *     │
 *     └── store error ──▶ Failed
 * ```
 *
 * - A post is never broadcast before `append` has returned, so a
 *   subscriber reacting to the notification can already read the post.
 * - A store failure ends the pipeline: nothing is broadcast and the error
 *   is returned to the caller. It is not retried.
 * - A broadcast failure is logged and recorded in the outcome; the post
 *   stays stored and the request still succeeds.
 */

use std::sync::Arc;

use crate::backend::error::StoreError;
use crate::backend::posts::repository::PostRepository;
use crate::backend::realtime::BroadcastChannel;
use crate::shared::{Post, PostCollection};

/// Result of the broadcast stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastStatus {
    Delivered,
    /// The relay failed; holds the reason for logs and tests
    Failed(String),
}

impl BroadcastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed(_) => "failed",
        }
    }
}

/// A post that made it through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub post: Post,
    pub broadcast: BroadcastStatus,
}

/// Store-then-broadcast orchestration shared by the post handlers
#[derive(Clone)]
pub struct PublishPipeline {
    repository: Arc<dyn PostRepository>,
    channel: BroadcastChannel,
}

impl PublishPipeline {
    pub fn new(repository: Arc<dyn PostRepository>, channel: BroadcastChannel) -> Self {
        Self {
            repository,
            channel,
        }
    }

    pub fn channel(&self) -> &BroadcastChannel {
        &self.channel
    }

    /// Store `content` as a new post, then announce it
    pub async fn publish(&self, content: &str) -> Result<PublishOutcome, StoreError> {
        tracing::debug!("[Posts] Received post ({} bytes)", content.len());

        let post = self.repository.append(content).await.map_err(|e| {
            tracing::error!("[Posts] Failed to store post: {}", e);
            e
        })?;
        tracing::info!("[Posts] Stored post {}", post.id);

        let broadcast = match self.channel.publish(&post).await {
            Ok(()) => BroadcastStatus::Delivered,
            Err(e) => {
                tracing::warn!(
                    "[Posts] Post {} stored but broadcast on {} failed: {}",
                    post.id,
                    self.channel.channel(),
                    e
                );
                BroadcastStatus::Failed(e.to_string())
            }
        };

        Ok(PublishOutcome { post, broadcast })
    }

    /// Snapshot of every stored post, newest first
    pub async fn list(&self) -> Result<PostCollection, StoreError> {
        let posts = self.repository.list_all().await.map_err(|e| {
            tracing::error!("[Posts] Failed to load posts: {}", e);
            e
        })?;
        Ok(PostCollection::new(posts))
    }
}

impl std::fmt::Debug for PublishPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishPipeline")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}
