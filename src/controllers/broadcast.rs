use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    domain::episode::{EpisodeHistory, EpisodeStoreApi},
    domain::pipeline::{BroadcastPipeline, RunMode, RunReport},
    error::{AppError, AppResult},
    infrastructure::auth::RequestId,
};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerBroadcastRequest {
    /// Overrides the configured mode for this run
    pub diagnostic: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub report: RunReport,
}

pub struct BroadcastController {
    pipeline: Arc<BroadcastPipeline>,
    episode_store: Arc<dyn EpisodeStoreApi>,
    diagnostic_by_default: bool,
    run_guard: Arc<Mutex<()>>,
}

impl BroadcastController {
    pub fn new(
        pipeline: Arc<BroadcastPipeline>,
        episode_store: Arc<dyn EpisodeStoreApi>,
        diagnostic_by_default: bool,
    ) -> Self {
        Self {
            pipeline,
            episode_store,
            diagnostic_by_default,
            run_guard: Arc::new(Mutex::new(())),
        }
    }

    /// POST /api/broadcasts - Run one broadcast to completion
    ///
    /// The run happens on its own task holding the run guard, so a caller
    /// that disconnects never cuts a broadcast short.
    pub async fn trigger(
        State(controller): State<Arc<BroadcastController>>,
        Extension(request_id): Extension<RequestId>,
        body: Bytes,
    ) -> AppResult<(StatusCode, Json<BroadcastResponse>)> {
        let request = parse_trigger_request(&body)?;

        let Ok(guard) = controller.run_guard.clone().try_lock_owned() else {
            return Err(AppError::Conflict(
                "A broadcast is already running".to_string(),
            ));
        };

        let mode = if request.diagnostic.unwrap_or(controller.diagnostic_by_default) {
            RunMode::Diagnostic
        } else {
            RunMode::Full
        };

        tracing::info!(request_id = %request_id.0, mode = ?mode, "Broadcast triggered over HTTP");

        let pipeline = controller.pipeline.clone();
        let run = tokio::spawn(async move {
            let _guard = guard;
            pipeline.run(mode).await
        });

        let report = run.await.map_err(|e| {
            tracing::error!(request_id = %request_id.0, error = %e, "Broadcast task aborted");
            AppError::Internal(format!("broadcast task aborted: {}", e))
        })??;

        Ok((
            StatusCode::CREATED,
            Json(BroadcastResponse {
                request_id: request_id.0,
                report,
            }),
        ))
    }

    /// GET /api/episodes - Current episode history, newest first
    pub async fn list_episodes(
        State(controller): State<Arc<BroadcastController>>,
    ) -> AppResult<Json<EpisodeHistory>> {
        let history = controller.episode_store.history().await?;
        Ok(Json(history))
    }
}

/// An empty body selects the configured mode; anything else must be a
/// well-formed request
fn parse_trigger_request(body: &[u8]) -> Result<TriggerBroadcastRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TriggerBroadcastRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid broadcast request: {}", e)))
}
