use super::tts_repository::TtsRepository;
use crate::domain::tts::VoiceAssignment;
use crate::infrastructure::gemini::{GeminiClient, GenerateContentRequest};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Gemini multi-speaker speech. Audio comes back base64-encoded inline as
/// 24 kHz 16-bit mono PCM.
pub struct GeminiTtsRepository {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiTtsRepository {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TtsRepository for GeminiTtsRepository {
    async fn synthesize(&self, text: &str, voices: &VoiceAssignment) -> Result<Vec<u8>, String> {
        let request = GenerateContentRequest::speech(text, voices);

        let response = self
            .client
            .generate_content(&self.model, &request)
            .await
            .map_err(|e| format!("Gemini TTS error: {}", e))?;

        let Some(encoded) = response.inline_data() else {
            tracing::warn!(
                model = %self.model,
                finish_reason = ?response.finish_reason(),
                "Gemini TTS returned no audio"
            );
            return Ok(Vec::new());
        };

        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| format!("Gemini TTS returned invalid base64 audio: {}", e))
    }
}
