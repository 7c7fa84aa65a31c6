/**
 * Post Data Structures
 *
 * This module defines the Post entity and the collection envelope returned
 * by `GET /posts`, plus the form accepted by `POST /posts`.
 *
 * A Post is immutable once created: its `id` is assigned by the store at
 * insert time and never changes afterwards.
 */
use serde::{Deserialize, Serialize};

/// A single published post
///
/// # Fields
/// * `id` - Store-assigned identifier, strictly increasing with insertion order
/// * `content` - Free text supplied verbatim by the author
///
/// # Example
/// ```rust
/// use liveblog::shared::Post;
///
/// let post = Post::new(1, "Kick-off in five minutes");
/// assert_eq!(
///     serde_json::to_string(&post).unwrap(),
///     r#"{"id":1,"content":"Kick-off in five minutes"}"#
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Store-assigned identifier
    pub id: i64,
    /// Post body
    pub content: String,
}

impl Post {
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

/// Point-in-time snapshot of every stored post, newest first
///
/// Serialized as `{"items": [...]}`. An empty store serializes as
/// `{"items": []}`; on the way in, a `null` or missing `items` field is
/// read as an empty collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostCollection {
    #[serde(rename = "items", default, deserialize_with = "null_as_empty")]
    pub posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Post>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Post>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Form body of `POST /posts`
///
/// A missing `content` field is read as the empty string; no other
/// validation is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub content: String,
}
