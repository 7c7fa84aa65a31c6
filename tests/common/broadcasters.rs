//! Fake broadcasters for pipeline and API tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use liveblog::backend::{BroadcastError, Broadcaster};
use liveblog::shared::Post;

/// Remembers every publish call
#[derive(Default)]
pub struct RecordingBroadcaster {
    calls: Mutex<Vec<(String, String, Post)>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, String, Post)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn publish(&self, channel: &str, event: &str, post: &Post) -> Result<(), BroadcastError> {
        self.calls
            .lock()
            .unwrap()
            .push((channel.to_string(), event.to_string(), post.clone()));
        Ok(())
    }
}

/// Fails every publish call, as an unreachable relay would
pub struct FailingBroadcaster;

#[async_trait]
impl Broadcaster for FailingBroadcaster {
    async fn publish(&self, _: &str, _: &str, _: &Post) -> Result<(), BroadcastError> {
        Err(BroadcastError::Rejected {
            status: 503,
            body: "relay unavailable".to_string(),
        })
    }
}
