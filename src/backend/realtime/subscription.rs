/**
 * Post Stream Subscription Handler
 *
 * `GET /posts/stream` exposes the in-process relay as Server-Sent Events.
 * Each new post arrives as one SSE event named after the configured event
 * (`new-post` by default) whose data is the post JSON.
 *
 * # Connection Management
 *
 * - Keep-alive comments are injected by axum
 * - Lagged subscribers skip the events they missed and keep streaming
 * - Nothing is replayed: a subscriber only sees posts stored after it
 *   connected; the full history is at `GET /posts`
 *
 * `GET /realtime` tells the landing page which of the two relays to use.
 * The stream itself is only mounted when posts go to the in-process relay.
 */

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::realtime::broadcast::LocalBroadcaster;
use crate::shared::RealtimeInfo;

/// Subscription details for browsers (GET /realtime)
///
/// ```json
/// {"mode":"pusher","key":"app-key","cluster":"eu","channel":"live-blog-stream","event":"new-post"}
/// {"mode":"local","stream":"/posts/stream","event":"new-post"}
/// ```
pub async fn handle_realtime_info(State(info): State<RealtimeInfo>) -> Json<RealtimeInfo> {
    Json(info)
}

/// Handle post stream subscription (GET /posts/stream)
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: new-post
/// id: 4
/// data: {"id":4,"content":"hello"}
/// ```
pub async fn handle_post_stream(
    State(relay): State<LocalBroadcaster>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    tracing::info!("[Realtime] Post stream subscription opened");

    let stream = stream::unfold(relay.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse_event = Event::default()
                        .event(event.event.as_str())
                        .id(event.payload.id.to_string())
                        .json_data(&event.payload);
                    return Some((sse_event, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Relay closed, ending stream");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
