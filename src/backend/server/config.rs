/**
 * Store Configuration
 *
 * Opens the SQLite database the post repository runs on and creates the
 * `posts` table when it is missing.
 *
 * # Connection Settings
 *
 * - The database file (and its parent directory) is created if missing
 * - WAL journal mode, so readers do not block the writer
 * - A busy timeout, so concurrent appends wait for the write lock instead
 *   of failing with `SQLITE_BUSY`
 * - The busy timeout and the pool acquire timeout both come from the store
 *   timeout: a statement that cannot get a connection or the write lock in
 *   time fails inside the driver, before anything is written
 *
 * # Error Handling
 *
 * Unlike the per-request path, failures here abort startup: a server
 * without its store has nothing to serve.
 */

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::backend::error::StoreError;

const MAX_CONNECTIONS: u32 = 5;

/// Schema of the posts table
///
/// `AUTOINCREMENT` keeps ids strictly increasing and never reused, even
/// after the highest row is removed by hand.
pub const POSTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts(
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    content TEXT
)
"#;

/// Open (creating if necessary) the SQLite database at `path`
///
/// `timeout` bounds both waiting for a pooled connection and waiting for
/// the database lock.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use liveblog::backend::server::config::{migrate_database, open_database};
///
/// # async fn example() -> Result<(), liveblog::backend::error::StoreError> {
/// let pool = open_database("./database/storage.db", Duration::from_secs(5)).await?;
/// migrate_database(&pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn open_database(
    path: impl AsRef<Path>,
    timeout: Duration,
) -> Result<SqlitePool, StoreError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("[Store] Opening database at {}", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await
        .map_err(StoreError::Connect)?;

    Ok(pool)
}

/// Create the posts table if it does not exist
///
/// Safe to run any number of times against the same database.
pub async fn migrate_database(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(POSTS_SCHEMA).execute(pool).await?;
    tracing::info!("[Store] Schema ready");
    Ok(())
}

/// Open the database and make sure the schema exists
pub async fn load_database(
    path: impl AsRef<Path>,
    timeout: Duration,
) -> Result<SqlitePool, StoreError> {
    let pool = open_database(path, timeout).await?;
    migrate_database(&pool).await?;
    Ok(pool)
}
