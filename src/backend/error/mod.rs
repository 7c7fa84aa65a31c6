//! Backend Error Module
//!
//! Error types for the request path and their HTTP conversion.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `StoreError` - the SQLite store failed, timed out, or returned a row
//!   that does not decode into a Post. Fatal to the current request only.
//! - `BroadcastError` - the realtime relay was unreachable, rejected the
//!   publish call, or timed out. Never surfaces to the client.
//! - `BackendError` - what handlers return; converts into a JSON response
//!   that carries no internal detail for server-side faults.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, BroadcastError, StoreError};
