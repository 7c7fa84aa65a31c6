/**
 * Realtime Event Envelope
 *
 * A `PostEvent` is what the in-process relay hands to its subscribers:
 * the channel and event name the post was published under, the stored
 * post itself, and the time it was relayed.
 */
use serde::{Deserialize, Serialize};

use crate::shared::config::LiveBlogConfig;
use crate::shared::post::Post;

/// Path of the in-process relay's SSE stream
pub const LOCAL_STREAM_PATH: &str = "/posts/stream";

/// Notification of a newly stored post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostEvent {
    /// Channel (topic) the event was published on
    pub channel: String,
    /// Event name, e.g. `new-post`
    pub event: String,
    /// The post, already carrying its store-assigned id
    pub payload: Post,
    /// RFC3339 timestamp of the publish call
    pub timestamp: String,
}

impl PostEvent {
    pub fn new(channel: impl Into<String>, event: impl Into<String>, payload: Post) -> Self {
        Self {
            channel: channel.into(),
            event: event.into(),
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Where a browser subscribes for new posts
///
/// Served at `GET /realtime` so the landing page can pick pusher-js or the
/// local SSE stream. Never carries the Pusher secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RealtimeInfo {
    Pusher {
        key: String,
        cluster: String,
        channel: String,
        event: String,
    },
    Local {
        stream: String,
        event: String,
    },
}

impl RealtimeInfo {
    pub fn local(event: impl Into<String>) -> Self {
        Self::Local {
            stream: LOCAL_STREAM_PATH.to_string(),
            event: event.into(),
        }
    }

    pub fn from_config(config: &LiveBlogConfig) -> Self {
        match &config.pusher {
            Some(pusher) => Self::Pusher {
                key: pusher.key.clone(),
                cluster: pusher.cluster.clone(),
                channel: config.channel.clone(),
                event: config.event.clone(),
            },
            None => Self::local(config.event.clone()),
        }
    }

    /// Whether the server itself streams new posts
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PusherConfig;

    #[test]
    fn test_event_new() {
        let event = PostEvent::new("live-blog-stream", "new-post", Post::new(7, "goal!"));
        assert_eq!(event.channel, "live-blog-stream");
        assert_eq!(event.event, "new-post");
        assert_eq!(event.payload.id, 7);
        assert!(chrono::DateTime::parse_from_rfc3339(&event.timestamp).is_ok());
    }

    #[test]
    fn test_event_payload_serializes_as_post() {
        let event = PostEvent::new("c", "e", Post::new(1, "x"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["payload"], serde_json::json!({"id": 1, "content": "x"}));
    }

    #[test]
    fn test_realtime_info_local_by_default() {
        let info = RealtimeInfo::from_config(&LiveBlogConfig::default());
        assert!(info.is_local());
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!({"mode": "local", "stream": "/posts/stream", "event": "new-post"})
        );
    }

    #[test]
    fn test_realtime_info_pusher_hides_secret() {
        let config = LiveBlogConfig::builder()
            .pusher(PusherConfig::new("1", "public-key", "top-secret", "eu"))
            .build()
            .unwrap();
        let info = RealtimeInfo::from_config(&config);
        assert!(!info.is_local());

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""mode":"pusher""#));
        assert!(json.contains("public-key"));
        assert!(!json.contains("top-secret"));
    }
}
