//! Server Module
//!
//! Initializes and configures the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs   - Module exports and documentation
//! ├── state.rs - AppState and FromRef implementations
//! ├── config.rs - SQLite connection and schema setup
//! └── init.rs  - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Store**: opens the database file and creates the posts table
//! 2. **Relay**: builds the Pusher client or the in-process relay
//! 3. **State**: assembles the publish pipeline into `AppState`
//! 4. **Router**: configures routes and middleware

/// Application state management
pub mod state;

/// Store configuration
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
