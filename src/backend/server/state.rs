/**
 * Application State Management
 *
 * `AppState` holds the explicitly constructed dependencies of the request
 * handlers: the publish pipeline (which owns the repository and the
 * broadcast channel), the in-process relay feeding `GET /posts/stream`, and
 * the subscription details served at `GET /realtime`.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(pipeline): State<PublishPipeline>`.
 */

use axum::extract::FromRef;

use crate::backend::posts::PublishPipeline;
use crate::backend::realtime::LocalBroadcaster;
use crate::shared::RealtimeInfo;

/// Application state shared by every handler
///
/// Cloning is cheap: every field is a handle onto shared state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store-then-broadcast orchestration for the /posts handlers
    pub pipeline: PublishPipeline,

    /// In-process relay
    ///
    /// Only fed when the pipeline publishes locally; `/posts/stream` is not
    /// mounted otherwise.
    pub relay: LocalBroadcaster,

    /// Where browsers subscribe
    pub realtime: RealtimeInfo,
}

impl AppState {
    pub fn new(pipeline: PublishPipeline, relay: LocalBroadcaster, realtime: RealtimeInfo) -> Self {
        Self {
            pipeline,
            relay,
            realtime,
        }
    }
}

impl FromRef<AppState> for PublishPipeline {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pipeline.clone()
    }
}

impl FromRef<AppState> for LocalBroadcaster {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.relay.clone()
    }
}

impl FromRef<AppState> for RealtimeInfo {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.realtime.clone()
    }
}
