/**
 * Router Configuration
 *
 * Combines the post routes, the two static pages and the middleware stack
 * into a single Axum router.
 *
 * # Middleware
 *
 * - `TraceLayer` logs every request and response through `tracing`
 * - `CatchPanicLayer` turns a panicking handler into a 500 response for
 *   that request only
 */

use std::path::Path;

use axum::{http::StatusCode, Router};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeFile, trace::TraceLayer};

use crate::backend::routes::post_routes::configure_post_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// - `GET /` - `<public_dir>/index.html` (live subscriber view)
/// - `GET /admin` - `<public_dir>/admin.html` (posting form)
/// - `GET|POST /posts`, `GET /posts/stream`, `GET /realtime` - see `post_routes`
///
/// Unknown paths return 404.
pub fn create_router(app_state: AppState, public_dir: &Path) -> Router<()> {
    let router = configure_post_routes(Router::new(), app_state.realtime.is_local());

    // Static pages
    let router = router
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")));

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
