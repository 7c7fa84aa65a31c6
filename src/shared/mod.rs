//! Shared Module
//!
//! Types that cross the wire: the `Post` entity as it appears in HTTP
//! responses and relay payloads, the event envelope pushed to subscribers,
//! and the process configuration.

/// Post data structures
pub mod post;

/// Realtime event envelope
pub mod event;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use post::{NewPost, Post, PostCollection};
pub use event::{PostEvent, RealtimeInfo};
pub use config::{ConfigError, LiveBlogConfig, LiveBlogConfigBuilder, PusherConfig};
