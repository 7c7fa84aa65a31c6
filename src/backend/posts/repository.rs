/**
 * Post Repository
 *
 * The two store operations the publish pipeline needs, behind a trait so
 * the pipeline can be built over a fake in tests.
 *
 * # Guarantees
 *
 * - `append` writes exactly one row per successful call and returns the
 *   post with the id the store assigned
 * - `list_all` is read-only and returns a fresh snapshot, newest first;
 *   an empty store yields an empty list
 * - Neither call validates or rewrites content
 * - Neither call retries; the first failure is returned to the caller
 *
 * # Timeouts
 *
 * An `INSERT` handed to the SQLite worker runs to completion even if the
 * caller stops waiting, so `append` is never cancelled from outside. The
 * pool's acquire timeout and busy timeout (see `open_database`) bound it
 * instead, and expiry of either is reported as `StoreError::Timeout`.
 * `list_all` is read-only and is additionally wrapped in
 * `tokio::time::timeout`.
 */

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::backend::error::StoreError;
use crate::backend::posts::db;
use crate::shared::Post;

/// Durable storage of posts
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post and return it with its assigned id
    async fn append(&self, content: &str) -> Result<Post, StoreError>;

    /// Every stored post, ordered by id descending
    async fn list_all(&self) -> Result<Vec<Post>, StoreError>;
}

/// `PostRepository` over a SQLite pool
///
/// The pool is the single process-wide store handle; SQLite serializes
/// concurrent writers, so ids stay unique and monotonic across requests.
#[derive(Debug, Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqlitePostRepository {
    /// `timeout` should be the one the pool was opened with; it bounds
    /// `list_all` and is the duration reported by `StoreError::Timeout`.
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }

    /// Report driver-side lock and pool expiry as a timeout
    fn classify(&self, error: StoreError) -> StoreError {
        match error {
            StoreError::Query(e) if is_timeout(&e) => StoreError::Timeout(self.timeout),
            other => other,
        }
    }
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

fn is_timeout(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            // Extended result codes carry the primary code in the low byte.
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false),
        _ => false,
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn append(&self, content: &str) -> Result<Post, StoreError> {
        let id = db::insert_post(&self.pool, content)
            .await
            .map_err(|e| self.classify(e))?;
        tracing::debug!("[Store] Appended post {}", id);
        Ok(Post::new(id, content))
    }

    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self
            .bounded(db::load_posts(&self.pool))
            .await
            .map_err(|e| self.classify(e))?;
        tracing::debug!("[Store] Loaded {} posts", posts.len());
        Ok(posts)
    }
}
