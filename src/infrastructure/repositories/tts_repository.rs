use crate::domain::tts::VoiceAssignment;
use async_trait::async_trait;

/// Remote multi-speaker speech service.
///
/// Implementations make exactly one request per call. Retrying and pacing
/// are the caller's concern.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` with each speaker label mapped to its voice.
    ///
    /// Returns raw PCM (signed 16-bit little-endian, 24 kHz, mono). An empty
    /// vector means the service answered without audio.
    ///
    /// # Errors
    /// Returns error if the request fails or the service rejects it
    async fn synthesize(&self, text: &str, voices: &VoiceAssignment) -> Result<Vec<u8>, String>;
}
