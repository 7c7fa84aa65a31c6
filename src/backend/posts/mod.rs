//! Posts Module
//!
//! The persist-then-broadcast pipeline and the read path over the store.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs        - Module exports and documentation
//! ├── db.rs         - SQL statements against the posts table
//! ├── repository.rs - PostRepository trait and its SQLite implementation
//! ├── pipeline.rs   - PublishPipeline (store, then broadcast)
//! └── handlers.rs   - HTTP handlers for /posts
//! ```

/// SQL statements
pub mod db;

/// Post repository
pub mod repository;

/// Publish pipeline
pub mod pipeline;

/// HTTP handlers
pub mod handlers;

pub use pipeline::{BroadcastStatus, PublishOutcome, PublishPipeline};
pub use repository::{PostRepository, SqlitePostRepository};
