use async_trait::async_trait;
use parking_lot::Mutex;
use pulsecast::domain::audio::{DiagnosticTone, EncodingError, RawAudioStream};
use pulsecast::domain::tts::VoiceAssignment;
use pulsecast::infrastructure::encoder::AudioEncoder;
use pulsecast::infrastructure::repositories::{ContentRepository, TtsRepository};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

pub const RESEARCH_RESPONSE: &str =
    "Chips are scarce and models are cheap.\n\n[METADATA]\n- TOP_STORIES: Chip deal, Model X ships, Robot startup\n- AUTO_INJECTED: Robotics\n- SUGGESTIONS: Agents, Edge inference";

pub const SCRIPT_RESPONSE: &str = "Alex: hi[TRANSITION]Marcus: bye";

/// Research and drafting backend with canned answers
#[derive(Default)]
pub struct MockContentRepository {
    pub fail_research: AtomicBool,
    /// When set, research waits for `release` before answering
    pub hold: AtomicBool,
    pub release: Notify,
    pub research_calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn research(&self, prompt: &str) -> Result<String, String> {
        self.research_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        if self.hold.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.fail_research.load(Ordering::SeqCst) {
            return Err("search backend unavailable".to_string());
        }
        Ok(RESEARCH_RESPONSE.to_string())
    }

    async fn draft_script(&self, prompt: &str) -> Result<String, String> {
        self.prompts.lock().push(prompt.to_string());
        Ok(SCRIPT_RESPONSE.to_string())
    }
}

/// Speech service returning ten bytes per successful call, filled with the
/// 0-based index of that call
#[derive(Default)]
pub struct MockTtsRepository {
    pub failures_before_success: AtomicUsize,
    pub attempts: AtomicUsize,
    pub texts: Mutex<Vec<String>>,
}

#[async_trait]
impl TtsRepository for MockTtsRepository {
    async fn synthesize(&self, text: &str, _voices: &VoiceAssignment) -> Result<Vec<u8>, String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let remaining = self.failures_before_success.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_before_success.store(remaining - 1, Ordering::SeqCst);
            return Err("503 Service Unavailable".to_string());
        }

        let mut texts = self.texts.lock();
        let index = texts.len() as u8;
        texts.push(text.to_string());
        Ok(vec![index; 10])
    }
}

/// Stands in for ffmpeg: copies the raw stream to the output file
#[derive(Default)]
pub struct CopyEncoder {
    pub encoded: Mutex<Vec<Vec<u8>>>,
    pub tones: AtomicUsize,
}

#[async_trait]
impl AudioEncoder for CopyEncoder {
    async fn encode(&self, raw: &RawAudioStream, output: &Path) -> Result<(), EncodingError> {
        let bytes = tokio::fs::read(raw.path())
            .await
            .map_err(|_| EncodingError::MissingOutput(raw.path().to_path_buf()))?;
        write_output(output, &bytes).await?;
        self.encoded.lock().push(bytes);
        Ok(())
    }

    async fn render_tone(&self, _tone: &DiagnosticTone, output: &Path) -> Result<(), EncodingError> {
        write_output(output, b"ID3 tone").await?;
        self.tones.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

async fn write_output(output: &Path, bytes: &[u8]) -> Result<(), EncodingError> {
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| EncodingError::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(output, bytes)
        .await
        .map_err(|_| EncodingError::MissingOutput(output.to_path_buf()))
}
