//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Main router creation and middleware
//! └── post_routes.rs - /posts routes
//! ```

/// Main router creation
pub mod router;

/// Post routes
pub mod post_routes;

// Re-export commonly used functions
pub use router::create_router;
