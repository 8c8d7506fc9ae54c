use crate::infrastructure::repositories::EpisodeRepository;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready when the episode history can be read
pub async fn health_ready(State(episode_repo): State<Arc<EpisodeRepository>>) -> impl IntoResponse {
    match episode_repo.load().await {
        Ok(history) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "history": "readable",
                "episodes": history.len()
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "history": "unreadable"
                })),
            )
        }
    }
}
