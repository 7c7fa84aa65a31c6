/**
 * Database Operations for Posts
 *
 * Raw statements against the `posts` table. The repository wraps these with
 * timeouts; nothing else should call them directly.
 */

use sqlx::SqlitePool;

use crate::backend::error::StoreError;
use crate::shared::Post;

/// Insert a post and return the id SQLite assigned to it
pub async fn insert_post(pool: &SqlitePool, content: &str) -> Result<i64, StoreError> {
    let result = sqlx::query("INSERT INTO posts (content) VALUES (?)")
        .bind(content)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Load every post, newest first
///
/// A row whose `content` is NULL cannot be represented as a Post and fails
/// the whole load with `StoreError::Decode`.
pub async fn load_posts(pool: &SqlitePool) -> Result<Vec<Post>, StoreError> {
    let rows = sqlx::query_as::<_, (i64, Option<String>)>(
        r#"
        SELECT id, content
        FROM posts
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, content)| match content {
            Some(content) => Ok(Post { id, content }),
            None => Err(StoreError::decode(format!("post {} has NULL content", id))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::backend::server::config::load_database;

    #[tokio::test]
    async fn test_insert_then_load_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let pool = load_database(dir.path().join("posts.db"), Duration::from_secs(5)).await.unwrap();

        let first = insert_post(&pool, "a").await.unwrap();
        let second = insert_post(&pool, "b").await.unwrap();
        assert!(second > first);

        let posts = load_posts(&pool).await.unwrap();
        assert_eq!(posts, vec![Post::new(second, "b"), Post::new(first, "a")]);
    }

    #[tokio::test]
    async fn test_null_content_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = load_database(dir.path().join("posts.db"), Duration::from_secs(5)).await.unwrap();

        sqlx::query("INSERT INTO posts (content) VALUES (NULL)")
            .execute(&pool)
            .await
            .unwrap();

        let err = load_posts(&pool).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
