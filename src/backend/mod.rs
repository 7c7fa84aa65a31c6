//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the SQLite-backed post
//! repository, the publish pipeline and the realtime relays.
//!
//! This module is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Store setup, application state, initialization
//! - **`routes`** - HTTP route configuration and middleware
//! - **`posts`** - Repository, publish pipeline, /posts handlers
//! - **`realtime`** - Broadcaster trait, Pusher client, in-process relay, SSE
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - liveblog-server binary
//! ├── server/     - Store setup, state, init
//! ├── routes/     - Route configuration
//! ├── posts/      - Post repository and pipeline
//! ├── realtime/   - Event broadcasting
//! └── error/      - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! POST /posts ─▶ PublishPipeline ─▶ PostRepository.append ─▶ SQLite
//!                      └──────────▶ BroadcastChannel.publish ─▶ relay
//! GET  /posts ─▶ PublishPipeline ─▶ PostRepository.list_all ─▶ SQLite
//! ```
//!
//! # Concurrency
//!
//! Each request runs on its own tokio task. The SQLite pool is the single
//! shared store handle and SQLite serializes writers; the broadcasters are
//! stateless apart from configuration and are shared without locking.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Posts: repository, pipeline, handlers
pub mod posts;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::{BackendError, BroadcastError, StoreError};
pub use posts::{PostRepository, PublishPipeline, SqlitePostRepository};
pub use realtime::{BroadcastChannel, Broadcaster, LocalBroadcaster, PusherBroadcaster};
pub use server::{create_app, AppState};
