//! Common test utilities and helpers
//!
//! - Temporary SQLite stores
//! - Fake broadcasters
//! - A router harness driven through `tower::ServiceExt::oneshot`

#![allow(dead_code)]

pub mod app;
pub mod broadcasters;
pub mod database;

pub use app::*;
pub use broadcasters::*;
pub use database::*;
