use super::error::PipelineError;
use super::state::{PipelineState, Transition};
use crate::domain::audio::{assemble, AudioFormat, DiagnosticTone};
use crate::domain::content::{ContentServiceApi, ScriptingError};
use crate::domain::episode::{episode_id, Episode, EpisodeStoreApi};
use crate::domain::feed::FeedPublisherApi;
use crate::domain::script::Chunker;
use crate::domain::tts::SynthesizerApi;
use crate::infrastructure::encoder::AudioEncoder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const FALLBACK_HEADLINE: &str = "Daily Intel";
const DIAGNOSTIC_TITLE: &str = "Diagnostic Signal";
const DIAGNOSTIC_HEADLINE: &str = "System Check";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Research, draft, synthesize and encode a real episode
    Full,
    /// Publish a fixed test tone without calling any remote service
    Diagnostic,
}

#[derive(Debug, Clone)]
pub struct BroadcastSettings {
    pub show_title: String,
    pub base_url: String,
    pub audio_dir: PathBuf,
    pub work_dir: PathBuf,
    pub run_timeout: Option<Duration>,
    pub tone: DiagnosticTone,
    /// How many recent episodes' headlines research is told to avoid
    pub exclusion_window: usize,
}

/// What happened during one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub mode: RunMode,
    pub episode_id: String,
    pub state: PipelineState,
    pub transitions: Vec<Transition>,
    pub segment_count: usize,
    pub audio_path: Option<PathBuf>,
    pub episode: Option<Episode>,
    pub history_len: Option<usize>,
    pub duration_ms: u64,
}

#[derive(Debug, thiserror::Error)]
#[error("{} during {failed_in}: {error}", .error.kind())]
pub struct RunFailure {
    pub failed_in: PipelineState,
    #[source]
    pub error: PipelineError,
    pub report: RunReport,
}

struct EpisodeDraft {
    title: String,
    headlines: Vec<String>,
    audio_path: PathBuf,
    duration_secs: u64,
}

/// Tracks the current state and records every transition
struct RunTracker {
    report: RunReport,
    started: Instant,
}

impl RunTracker {
    fn new(mode: RunMode, episode_id: String) -> Self {
        Self {
            report: RunReport {
                mode,
                episode_id,
                state: PipelineState::Idle,
                transitions: Vec::new(),
                segment_count: 0,
                audio_path: None,
                episode: None,
                history_len: None,
                duration_ms: 0,
            },
            started: Instant::now(),
        }
    }

    fn state(&self) -> PipelineState {
        self.report.state
    }

    fn advance(&mut self, to: PipelineState) {
        let from = self.report.state;
        tracing::info!(
            episode_id = %self.report.episode_id,
            from = %from,
            to = %to,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Pipeline state changed"
        );
        self.report.transitions.push(Transition {
            from,
            to,
            at: Utc::now(),
        });
        self.report.state = to;
    }

    fn finish(mut self) -> RunReport {
        self.report.duration_ms = self.started.elapsed().as_millis() as u64;
        self.report
    }
}

/// Runs one broadcast end to end, strictly one stage at a time.
///
/// Nothing is recorded unless production fully succeeded, and the feed is
/// only regenerated from the history that Recording just wrote.
pub struct BroadcastPipeline {
    content: Arc<dyn ContentServiceApi>,
    chunker: Chunker,
    synthesizer: Arc<dyn SynthesizerApi>,
    encoder: Arc<dyn AudioEncoder>,
    episodes: Arc<dyn EpisodeStoreApi>,
    feed: Arc<dyn FeedPublisherApi>,
    settings: BroadcastSettings,
}

impl BroadcastPipeline {
    pub fn new(
        content: Arc<dyn ContentServiceApi>,
        chunker: Chunker,
        synthesizer: Arc<dyn SynthesizerApi>,
        encoder: Arc<dyn AudioEncoder>,
        episodes: Arc<dyn EpisodeStoreApi>,
        feed: Arc<dyn FeedPublisherApi>,
        settings: BroadcastSettings,
    ) -> Self {
        Self {
            content,
            chunker,
            synthesizer,
            encoder,
            episodes,
            feed,
            settings,
        }
    }

    pub async fn run(&self, mode: RunMode) -> Result<RunReport, RunFailure> {
        let created_at = Utc::now();
        let mut tracker = RunTracker::new(mode, episode_id(created_at));

        tracing::info!(
            episode_id = %tracker.report.episode_id,
            mode = ?mode,
            "Broadcast run started"
        );

        let produced = match mode {
            RunMode::Full => self.produce(&mut tracker, created_at).await,
            RunMode::Diagnostic => self.produce_diagnostic(&tracker).await,
        };

        let outcome = match produced {
            Ok(draft) => self.record(&mut tracker, created_at, draft).await,
            Err(error) => Err(error),
        };

        match outcome {
            Ok(()) => {
                tracker.advance(PipelineState::Completed);
                let report = tracker.finish();
                tracing::info!(
                    episode_id = %report.episode_id,
                    segment_count = report.segment_count,
                    duration_ms = report.duration_ms,
                    "Broadcast complete"
                );
                Ok(report)
            }
            Err(error) => {
                let failed_in = tracker.state();
                tracing::error!(
                    episode_id = %tracker.report.episode_id,
                    kind = error.kind(),
                    failed_in = %failed_in,
                    error = %error,
                    "Broadcast failed"
                );
                tracker.advance(PipelineState::Failed);
                Err(RunFailure {
                    failed_in,
                    error,
                    report: tracker.finish(),
                })
            }
        }
    }

    async fn produce(
        &self,
        tracker: &mut RunTracker,
        created_at: DateTime<Utc>,
    ) -> Result<EpisodeDraft, PipelineError> {
        let id = tracker.report.episode_id.clone();
        let deadline = self.settings.run_timeout.map(|t| tracker.started + t);

        tracker.advance(PipelineState::Researching);
        let covered = self.covered_headlines().await;
        let report = self
            .content
            .research(created_at.date_naive(), &covered)
            .await?;

        tracker.advance(PipelineState::Scripting);
        let script = self.content.draft_script(&report).await?;
        let segments = self.chunker.chunk(&script);
        if segments.is_empty() {
            return Err(ScriptingError::NoSegments.into());
        }
        tracker.report.segment_count = segments.len();

        tracker.advance(PipelineState::Synthesizing);
        let chunks = self.synthesizer.synthesize_all(&segments, deadline).await?;

        tracker.advance(PipelineState::Assembling);
        let raw_path = self.settings.work_dir.join(format!("episode-{}.pcm", id));
        let raw = match assemble(&raw_path, AudioFormat::PCM_S16LE_24K_MONO, chunks).await {
            Ok(raw) => raw,
            Err(e) => {
                remove_raw_audio(&raw_path).await;
                return Err(e.into());
            }
        };

        tracker.advance(PipelineState::Encoding);
        let audio_path = self.audio_path(&id);
        let encoded = self.encoder.encode(&raw, &audio_path).await;
        remove_raw_audio(raw.path()).await;
        if let Err(e) = encoded {
            remove_partial_output(&audio_path).await;
            return Err(e.into());
        }

        let headline = report.lead_headline().unwrap_or(FALLBACK_HEADLINE);
        Ok(EpisodeDraft {
            title: format!("{}: {}", self.settings.show_title, headline),
            headlines: report.headlines.clone(),
            audio_path,
            duration_secs: raw.duration_secs().round() as u64,
        })
    }

    async fn produce_diagnostic(&self, tracker: &RunTracker) -> Result<EpisodeDraft, PipelineError> {
        let audio_path = self.audio_path(&tracker.report.episode_id);

        tracing::info!(
            frequency_hz = self.settings.tone.frequency_hz,
            duration_secs = self.settings.tone.duration.as_secs(),
            "Diagnostic mode, rendering test tone"
        );
        if let Err(e) = self
            .encoder
            .render_tone(&self.settings.tone, &audio_path)
            .await
        {
            remove_partial_output(&audio_path).await;
            return Err(e.into());
        }

        Ok(EpisodeDraft {
            title: DIAGNOSTIC_TITLE.to_string(),
            headlines: vec![DIAGNOSTIC_HEADLINE.to_string()],
            audio_path,
            duration_secs: self.settings.tone.duration.as_secs(),
        })
    }

    /// Headlines of recent episodes, so research does not repeat them.
    ///
    /// This is a read-only look at the history. An unreadable history only
    /// costs the exclusions here; Recording reports it.
    async fn covered_headlines(&self) -> Vec<String> {
        if self.settings.exclusion_window == 0 {
            return Vec::new();
        }
        match self.episodes.history().await {
            Ok(history) => history.recent_headlines(self.settings.exclusion_window),
            Err(e) => {
                tracing::warn!(error = %e, "Episode history unreadable, researching without exclusions");
                Vec::new()
            }
        }
    }

    async fn record(
        &self,
        tracker: &mut RunTracker,
        created_at: DateTime<Utc>,
        draft: EpisodeDraft,
    ) -> Result<(), PipelineError> {
        tracker.advance(PipelineState::Recording);

        let episode = Episode::new(
            created_at,
            draft.title,
            audio_url(&self.settings.base_url, &tracker.report.episode_id),
            draft.headlines,
        )
        .with_duration(draft.duration_secs);
        tracker.report.audio_path = Some(draft.audio_path);

        let history = self.episodes.record(episode.clone()).await?;
        self.feed.publish(&history, Utc::now()).await?;

        tracker.report.history_len = Some(history.len());
        tracker.report.episode = Some(episode);
        Ok(())
    }

    fn audio_path(&self, id: &str) -> PathBuf {
        self.settings
            .audio_dir
            .join(format!("episode-{}.mp3", id))
    }
}

/// Public URL an episode's audio is served from
pub fn audio_url(base_url: &str, id: &str) -> String {
    format!("{}/audio/episode-{}.mp3", base_url.trim_end_matches('/'), id)
}

/// An encoder that fails after opening its output can leave a truncated file
async fn remove_partial_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::warn!(path = %path.display(), "Partial encoder output removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial encoder output"
        ),
    }
}

async fn remove_raw_audio(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Raw audio removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove raw audio"
        ),
    }
}
