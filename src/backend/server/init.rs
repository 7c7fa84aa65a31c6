/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Open the SQLite database and create the posts table if missing
 * 2. Pick the broadcaster: Pusher when credentials are configured,
 *    otherwise the in-process relay
 * 3. Assemble the publish pipeline and application state
 * 4. Create the router
 *
 * Any failure here aborts startup; once the router is serving, store and
 * relay failures are confined to the request that hit them.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::error::{BroadcastError, StoreError};
use crate::backend::posts::{PublishPipeline, SqlitePostRepository};
use crate::backend::realtime::{BroadcastChannel, Broadcaster, LocalBroadcaster, PusherBroadcaster};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::{LiveBlogConfig, RealtimeInfo};

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to create relay client: {0}")]
    Broadcast(#[from] BroadcastError),
}

/// Create and configure the Axum application
pub async fn create_app(config: &LiveBlogConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing LiveBlog backend server");

    let app_state = build_state(config).await?;
    let app = create_router(app_state, &config.public_dir);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the application state described by `config`
pub async fn build_state(config: &LiveBlogConfig) -> Result<AppState, InitError> {
    let pool = load_database(&config.database_path, config.store_timeout).await?;
    let repository = Arc::new(SqlitePostRepository::new(pool, config.store_timeout));

    let relay = LocalBroadcaster::default();
    let broadcaster: Arc<dyn Broadcaster> = match &config.pusher {
        Some(pusher) => {
            tracing::info!(
                "[Realtime] Publishing through Pusher at {}",
                pusher.base_url()
            );
            Arc::new(PusherBroadcaster::new(pusher.clone())?)
        }
        None => {
            tracing::warn!("[Realtime] Pusher credentials not set, using the in-process relay");
            Arc::new(relay.clone())
        }
    };

    let channel = BroadcastChannel::new(
        config.channel.clone(),
        config.event.clone(),
        broadcaster,
        config.broadcast_timeout,
    );
    tracing::info!(
        "[Realtime] New posts announced as {} on {}",
        channel.event(),
        channel.channel()
    );

    let realtime = RealtimeInfo::from_config(config);
    Ok(AppState::new(
        PublishPipeline::new(repository, channel),
        relay,
        realtime,
    ))
}
