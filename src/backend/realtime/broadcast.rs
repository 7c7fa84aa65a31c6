/**
 * Real-time Event Broadcasting
 *
 * The `Broadcaster` trait is the seam between the publish pipeline and
 * whatever relays new posts to subscribers. Two implementations exist:
 *
 * - `PusherBroadcaster` (see `pusher.rs`) - the external relay
 * - `LocalBroadcaster` - an in-process relay over `tokio::sync::broadcast`,
 *   consumed by the SSE endpoint at `GET /posts/stream`
 *
 * `BroadcastChannel` pins the process-wide channel and event name and
 * bounds every publish call with a timeout.
 *
 * # Delivery
 *
 * Publishing is fire-and-forget: delivery to zero, some or all connected
 * subscribers is acceptable, and a subscriber that connects later never
 * sees earlier events.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::backend::error::BroadcastError;
use crate::shared::{Post, PostEvent};

/// Relay for newly stored posts
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Publish `post` as `event` on `channel`
    async fn publish(&self, channel: &str, event: &str, post: &Post) -> Result<(), BroadcastError>;
}

/// In-process relay
///
/// Cloning shares the underlying channel. Capacity bounds how far a slow
/// subscriber may fall behind before it starts skipping events.
#[derive(Debug, Clone)]
pub struct LocalBroadcaster {
    sender: broadcast::Sender<PostEvent>,
}

impl LocalBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PostEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LocalBroadcaster {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl Broadcaster for LocalBroadcaster {
    async fn publish(&self, channel: &str, event: &str, post: &Post) -> Result<(), BroadcastError> {
        match self.sender.send(PostEvent::new(channel, event, post.clone())) {
            Ok(subscriber_count) => {
                tracing::info!(
                    "[Realtime] Post {} relayed to {} local subscribers",
                    post.id,
                    subscriber_count
                );
            }
            Err(_) => {
                // No subscribers, that's okay
                tracing::debug!("[Realtime] No local subscribers for post {}", post.id);
            }
        }
        Ok(())
    }
}

/// The single channel/event pair new posts are announced on
#[derive(Clone)]
pub struct BroadcastChannel {
    channel: String,
    event: String,
    broadcaster: Arc<dyn Broadcaster>,
    timeout: Duration,
}

impl BroadcastChannel {
    pub fn new(
        channel: impl Into<String>,
        event: impl Into<String>,
        broadcaster: Arc<dyn Broadcaster>,
        timeout: Duration,
    ) -> Self {
        Self {
            channel: channel.into(),
            event: event.into(),
            broadcaster,
            timeout,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// Announce a stored post
    pub async fn publish(&self, post: &Post) -> Result<(), BroadcastError> {
        tokio::time::timeout(
            self.timeout,
            self.broadcaster.publish(&self.channel, &self.event, post),
        )
        .await
        .map_err(|_| BroadcastError::Timeout(self.timeout))?
    }
}

impl std::fmt::Debug for BroadcastChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastChannel")
            .field("channel", &self.channel)
            .field("event", &self.event)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StalledBroadcaster;

    #[async_trait]
    impl Broadcaster for StalledBroadcaster {
        async fn publish(&self, _: &str, _: &str, _: &Post) -> Result<(), BroadcastError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_local_publish_without_subscribers_succeeds() {
        let local = LocalBroadcaster::new(8);
        assert_eq!(local.subscriber_count(), 0);
        local
            .publish("live-blog-stream", "new-post", &Post::new(1, "a"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_local_publish_reaches_every_subscriber() {
        let local = LocalBroadcaster::new(8);
        let mut first = local.subscribe();
        let mut second = local.subscribe();

        local
            .publish("live-blog-stream", "new-post", &Post::new(5, "hi"))
            .await
            .unwrap();

        for rx in [&mut first, &mut second] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.channel, "live-blog-stream");
            assert_eq!(event.event, "new-post");
            assert_eq!(event.payload, Post::new(5, "hi"));
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let local = LocalBroadcaster::new(8);
        let _early = local.subscribe();
        local.publish("c", "e", &Post::new(1, "early")).await.unwrap();

        let mut late = local.subscribe();
        local.publish("c", "e", &Post::new(2, "late")).await.unwrap();

        assert_eq!(late.recv().await.unwrap().payload.id, 2);
    }

    #[tokio::test]
    async fn test_channel_uses_configured_names() {
        let local = LocalBroadcaster::new(8);
        let mut rx = local.subscribe();
        let channel = BroadcastChannel::new(
            "live-blog-stream",
            "new-post",
            Arc::new(local.clone()),
            Duration::from_secs(1),
        );

        channel.publish(&Post::new(3, "c")).await.unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.channel, channel.channel());
        assert_eq!(event.event, channel.event());
    }

    #[tokio::test]
    async fn test_channel_times_out_stalled_relay() {
        let channel = BroadcastChannel::new(
            "c",
            "e",
            Arc::new(StalledBroadcaster),
            Duration::from_millis(20),
        );

        let err = channel.publish(&Post::new(1, "x")).await.unwrap_err();
        assert!(matches!(err, BroadcastError::Timeout(_)));
    }
}
