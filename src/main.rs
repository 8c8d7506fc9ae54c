use anyhow::Context;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsecast::controllers::broadcast::BroadcastController;
use pulsecast::domain::audio::DiagnosticTone;
use pulsecast::domain::content::ContentService;
use pulsecast::domain::episode::EpisodeStore;
use pulsecast::domain::feed::FeedPublisher;
use pulsecast::domain::pipeline::{BroadcastPipeline, BroadcastSettings, RunMode};
use pulsecast::domain::script::Chunker;
use pulsecast::domain::tts::{RetryPolicy, SynthesizerClient};
use pulsecast::infrastructure::config::{Config, LogFormat, TriggerMode};
use pulsecast::infrastructure::encoder::FfmpegEncoder;
use pulsecast::infrastructure::gemini::GeminiClient;
use pulsecast::infrastructure::http::start_http_server;
use pulsecast::infrastructure::repositories::{
    EpisodeRepository, FeedRepository, GeminiContentRepository, GeminiTtsRepository,
};
use pulsecast::infrastructure::state::check_state_dir;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    init_logging(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Broadcaster stopped");
            eprintln!("CRITICAL BROADCAST ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        environment = ?config.environment,
        trigger_mode = ?config.trigger_mode,
        diagnostic = config.diagnostic,
        data_dir = %config.data_dir.display(),
        publish_base_url = %config.publish_base_url,
        "Starting Pulsecast"
    );

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("cannot create {}", config.data_dir.display()))?;
    check_state_dir(&config.data_dir)
        .await
        .with_context(|| format!("state directory {} is not usable", config.data_dir.display()))?;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Remote clients
    let gemini_client = Arc::new(
        GeminiClient::new(
            &config.gemini_api_base,
            &config.gemini_api_key,
            config.gemini_request_timeout,
        )
        .context("cannot build Gemini HTTP client")?,
    );

    // 2. Repositories
    let content_repo = Arc::new(GeminiContentRepository::new(
        gemini_client.clone(),
        config.gemini_text_model.clone(),
    ));
    let tts_repo = Arc::new(GeminiTtsRepository::new(
        gemini_client,
        config.gemini_tts_model.clone(),
    ));
    let episode_repo = Arc::new(EpisodeRepository::new(config.history_path()));
    let feed_repo = Arc::new(FeedRepository::new(config.feed_path()));

    // 3. Services
    let retry = RetryPolicy::new(
        config.pipeline.max_retry_attempts,
        config.pipeline.base_backoff_delay,
    );
    tracing::info!(
        max_attempts = retry.max_attempts(),
        worst_case_backoff_ms = retry.worst_case_wait().as_millis() as u64,
        inter_segment_delay_ms = config.pipeline.inter_segment_delay.as_millis() as u64,
        "Synthesis retry policy"
    );

    let content_service = Arc::new(ContentService::new(
        content_repo,
        config.research_topics.clone(),
        config.show_profile.clone(),
    ));
    let synthesizer = Arc::new(SynthesizerClient::new(
        tts_repo,
        config.voices.clone(),
        retry,
        config.pipeline.inter_segment_delay,
    ));
    let chunker = Chunker::new(
        config.segment_delimiter.clone(),
        config.pipeline.max_chunk_length,
        config.pipeline.min_fragment_length,
        config.phonetic_rules.clone(),
    );
    let episode_store = Arc::new(EpisodeStore::new(
        episode_repo.clone(),
        config.pipeline.history_cap,
    ));
    let feed_publisher = Arc::new(FeedPublisher::new(
        feed_repo,
        config.feed_channel.clone(),
        config.publish_base_url.clone(),
    ));

    let pipeline = Arc::new(BroadcastPipeline::new(
        content_service,
        chunker,
        synthesizer,
        Arc::new(FfmpegEncoder::new(config.ffmpeg_path.clone())),
        episode_store.clone(),
        feed_publisher,
        BroadcastSettings {
            show_title: config.show_title.clone(),
            base_url: config.publish_base_url.clone(),
            audio_dir: config.audio_dir.clone(),
            work_dir: config.work_dir.clone(),
            run_timeout: config.run_timeout,
            tone: DiagnosticTone::default(),
            exclusion_window: config.exclusion_window,
        },
    ));

    match config.trigger_mode {
        TriggerMode::Once => {
            let mode = if config.diagnostic {
                RunMode::Diagnostic
            } else {
                RunMode::Full
            };
            let report = pipeline.run(mode).await?;
            tracing::info!(
                episode_id = %report.episode_id,
                history_len = ?report.history_len,
                duration_ms = report.duration_ms,
                "Broadcast published"
            );
            Ok(())
        }
        TriggerMode::Serve => {
            let broadcast_controller = Arc::new(BroadcastController::new(
                pipeline,
                episode_store,
                config.diagnostic,
            ));
            start_http_server(config, episode_repo, broadcast_controller)
                .await
                .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pulsecast=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "pulsecast=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
