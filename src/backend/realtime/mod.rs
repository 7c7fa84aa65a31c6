//! Real-time Update Module
//!
//! Announces newly stored posts to live subscribers.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Broadcaster trait, in-process relay, BroadcastChannel
//! ├── pusher.rs       - Pusher HTTP API client
//! └── subscription.rs - SSE stream over the in-process relay, /realtime
//! ```
//!
//! # Relay Selection
//!
//! With Pusher credentials configured, posts go to the external relay and
//! browsers subscribe there. Without them, posts go to the in-process relay
//! and browsers subscribe to `GET /posts/stream`. `GET /realtime` tells the
//! landing page which one applies.

/// Broadcaster trait and in-process relay
pub mod broadcast;

/// Pusher HTTP API client
pub mod pusher;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{BroadcastChannel, Broadcaster, LocalBroadcaster};
pub use pusher::PusherBroadcaster;
pub use subscription::{handle_post_stream, handle_realtime_info};
