use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::{
    controllers::{broadcast::BroadcastController, health},
    infrastructure::auth::{bearer_token_middleware, request_id_middleware, TriggerToken},
    infrastructure::repositories::EpisodeRepository,
};

/// Build the trigger hook routes
pub fn router(
    trigger_token: TriggerToken,
    episode_repo: Arc<EpisodeRepository>,
    broadcast_controller: Arc<BroadcastController>,
) -> Router {
    // Broadcast routes (require the trigger token when one is configured)
    let broadcast_routes = Router::new()
        .route("/api/broadcasts", post(BroadcastController::trigger))
        .route("/api/episodes", get(BroadcastController::list_episodes))
        .with_state(broadcast_controller)
        .layer(middleware::from_fn_with_state(
            Arc::new(trigger_token),
            bearer_token_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(episode_repo)
        .merge(broadcast_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    episode_repo: Arc<EpisodeRepository>,
    broadcast_controller: Arc<BroadcastController>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.trigger_token.is_none() {
        if !config.is_development() {
            return Err("TRIGGER_TOKEN must be set when serving in production".into());
        }
        tracing::warn!("TRIGGER_TOKEN is not set, broadcast endpoints are unauthenticated");
    }

    let app = router(
        TriggerToken(config.trigger_token.clone()),
        episode_repo,
        broadcast_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
