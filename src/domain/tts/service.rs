use super::error::SynthesisError;
use super::retry::RetryPolicy;
use super::voices::VoiceAssignment;
use crate::domain::audio::AudioChunk;
use crate::domain::script::Segment;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Turns script segments into raw audio through the speech service,
/// retrying transient failures and pacing calls to respect rate limits.
pub struct SynthesizerClient {
    tts_repo: Arc<dyn TtsRepository>,
    voices: VoiceAssignment,
    retry: RetryPolicy,
    inter_segment_delay: Duration,
}

impl SynthesizerClient {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        voices: VoiceAssignment,
        retry: RetryPolicy,
        inter_segment_delay: Duration,
    ) -> Self {
        Self {
            tts_repo,
            voices,
            retry,
            inter_segment_delay,
        }
    }
}

#[async_trait]
pub trait SynthesizerApi: Send + Sync {
    /// Synthesize one segment.
    ///
    /// Transport errors, remote errors and responses without audio are all
    /// retried. Only the failure of the last attempt is returned.
    async fn synthesize(&self, segment: &Segment) -> Result<AudioChunk, SynthesisError>;

    /// Synthesize every segment strictly in order, one call at a time.
    ///
    /// No new segment call is issued once `deadline` has passed. Calls
    /// already in flight run to completion.
    async fn synthesize_all(
        &self,
        segments: &[Segment],
        deadline: Option<Instant>,
    ) -> Result<Vec<AudioChunk>, SynthesisError>;
}

#[async_trait]
impl SynthesizerApi for SynthesizerClient {
    async fn synthesize(&self, segment: &Segment) -> Result<AudioChunk, SynthesisError> {
        let start_time = Instant::now();

        let audio = self
            .retry
            .run(|attempt| async move {
                tracing::debug!(
                    position = segment.position,
                    attempt = attempt,
                    text_length = segment.text.len(),
                    "Calling speech service"
                );

                let audio = self.tts_repo.synthesize(&segment.text, &self.voices).await?;
                if audio.is_empty() {
                    return Err("speech service returned no audio data".to_string());
                }
                Ok(audio)
            })
            .await
            .map_err(|exhausted| SynthesisError::RetriesExhausted {
                position: segment.position,
                attempts: exhausted.attempts,
                cause: exhausted.last_error,
            })?;

        tracing::info!(
            position = segment.position,
            audio_size_bytes = audio.len(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Segment synthesized"
        );

        Ok(AudioChunk::new(segment.position, audio))
    }

    async fn synthesize_all(
        &self,
        segments: &[Segment],
        deadline: Option<Instant>,
    ) -> Result<Vec<AudioChunk>, SynthesisError> {
        let mut chunks = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.inter_segment_delay).await;
            }

            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    tracing::error!(
                        position = segment.position,
                        total = segments.len(),
                        "Run deadline passed, no further segments will be requested"
                    );
                    return Err(SynthesisError::DeadlineExceeded {
                        position: segment.position,
                        total: segments.len(),
                    });
                }
            }

            tracing::info!(
                segment = index + 1,
                total = segments.len(),
                "Synthesizing segment"
            );
            chunks.push(self.synthesize(segment).await?);
        }

        Ok(chunks)
    }
}
