/**
 * Post Route Handlers
 *
 * # Routes
 *
 * - `GET /posts` - every post, newest first
 * - `POST /posts` - publish a post (form field `content`)
 * - `GET /posts/stream` - Server-Sent Events from the in-process relay,
 *   mounted only when the in-process relay is in use
 * - `GET /realtime` - where browsers subscribe
 */

use axum::{routing::get, Router};

use crate::backend::posts::handlers::{create_post, list_posts};
use crate::backend::realtime::subscription::{handle_post_stream, handle_realtime_info};
use crate::shared::event::LOCAL_STREAM_PATH;
use crate::backend::server::state::AppState;

/// Configure post-related routes
pub fn configure_post_routes(router: Router<AppState>, local_stream: bool) -> Router<AppState> {
    let router = router
        .route("/posts", get(list_posts).post(create_post))
        .route("/realtime", get(handle_realtime_info));

    if local_stream {
        router.route(LOCAL_STREAM_PATH, get(handle_post_stream))
    } else {
        router
    }
}
