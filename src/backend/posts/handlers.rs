//! Post HTTP Handlers
//!
//! - `POST /posts` runs the publish pipeline
//! - `GET /posts` is the retrieval endpoint

use axum::{
    extract::{rejection::FormRejection, State},
    response::IntoResponse,
    Form, Json,
};

use crate::backend::error::BackendError;
use crate::backend::posts::pipeline::{BroadcastStatus, PublishPipeline};
use crate::shared::{NewPost, Post, PostCollection};

/// Response header reporting whether the new post reached the relay
pub const BROADCAST_STATUS_HEADER: &str = "x-broadcast-status";

/// Create a post (POST /posts)
///
/// Accepts an `application/x-www-form-urlencoded` body with a `content`
/// field. The content is stored verbatim; an absent field stores an empty
/// post. The response is the stored post even when the broadcast failed;
/// the `x-broadcast-status` header says `delivered` or `failed`.
///
/// # Errors
///
/// * `415`/`400` - the body is not a urlencoded form
/// * `500 Internal Server Error` - the store failed; nothing was broadcast
pub async fn create_post(
    State(pipeline): State<PublishPipeline>,
    form: Result<Form<NewPost>, FormRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Form(new_post) =
        form.map_err(|rejection| BackendError::handler(rejection.status(), rejection.body_text()))?;

    let outcome = pipeline.publish(&new_post.content).await?;
    if let BroadcastStatus::Failed(reason) = &outcome.broadcast {
        tracing::info!(
            "[Posts] Acknowledging post {} without broadcast: {}",
            outcome.post.id,
            reason
        );
    }

    Ok((
        [(BROADCAST_STATUS_HEADER, outcome.broadcast.as_str())],
        Json::<Post>(outcome.post),
    ))
}

/// List every post, newest first (GET /posts)
///
/// Always a fresh snapshot; an empty store returns `{"items": []}`.
pub async fn list_posts(
    State(pipeline): State<PublishPipeline>,
) -> Result<Json<PostCollection>, BackendError> {
    let collection = pipeline.list().await?;
    tracing::debug!("[Posts] Returning {} posts", collection.len());
    Ok(Json(collection))
}
