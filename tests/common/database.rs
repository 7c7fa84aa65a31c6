//! Database test fixtures
//!
//! Each fixture owns a temporary directory; the SQLite file inside it is
//! removed when the fixture is dropped.

use std::path::PathBuf;
use std::time::Duration;

use liveblog::backend::server::config::{load_database, open_database};
use liveblog::backend::SqlitePostRepository;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestDatabase {
    dir: TempDir,
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a fresh database with the posts table in place
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let pool = load_database(dir.path().join("storage.db"), STORE_TIMEOUT)
            .await
            .expect("Failed to open test database");
        Self { dir, pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("storage.db")
    }

    pub fn dir(&self) -> &TempDir {
        &self.dir
    }

    pub fn repository(&self) -> SqlitePostRepository {
        SqlitePostRepository::new(self.pool.clone(), STORE_TIMEOUT)
    }

    /// Repository on its own pool over the same file, bounded by `timeout`
    pub async fn repository_with_timeout(&self, timeout: Duration) -> SqlitePostRepository {
        let pool = open_database(self.path(), timeout)
            .await
            .expect("Failed to open second pool");
        SqlitePostRepository::new(pool, timeout)
    }

    pub async fn row_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count posts");
        count
    }
}
