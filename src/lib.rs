//! LiveBlog - Main Library
//!
//! LiveBlog is a small content-publishing backend: it accepts text posts,
//! stores them durably in SQLite and notifies live subscribers of every new
//! post through a realtime relay.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - `Post`, `PostCollection` and the `NewPost` form
//!   - `PostEvent`, the payload relayed to subscribers
//!   - `LiveBlogConfig` and its builder
//!
//! - **`backend`** - Server-side code (only compiled with the `server` feature)
//!   - Axum HTTP server and routes
//!   - Post repository over SQLite (sqlx)
//!   - Publish pipeline (store, then broadcast)
//!   - Realtime broadcasters (Pusher HTTP API, in-process relay + SSE)
//!
//! # Usage
//!
//! ```rust,no_run
//! use liveblog::backend::server::init::create_app;
//! use liveblog::shared::LiveBlogConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LiveBlogConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Write Path
//!
//! `POST /posts` runs the publish pipeline: the post is appended to the
//! store first and only a stored post (with its store-assigned id) is ever
//! broadcast. A failing relay never fails the request.
//!
//! # Error Handling
//!
//! - `shared::ConfigError` for configuration problems at startup
//! - `backend::error::{StoreError, BroadcastError, BackendError}` on the
//!   request path; store faults become a generic 500 response and the
//!   process keeps serving other requests

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;
