use super::content_repository::ContentRepository;
use crate::infrastructure::gemini::{GeminiClient, GenerateContentRequest};
use async_trait::async_trait;
use std::sync::Arc;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

pub struct GeminiContentRepository {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiContentRepository {
    pub fn new(client: Arc<GeminiClient>, model: String) -> Self {
        Self { client, model }
    }

    async fn generate(&self, request: GenerateContentRequest) -> Result<String, String> {
        let response = self
            .client
            .generate_content(&self.model, &request)
            .await
            .map_err(|e| format!("Gemini error: {}", e))?;

        response.text().ok_or_else(|| {
            format!(
                "Gemini returned no text (finish reason: {})",
                response.finish_reason().unwrap_or("unknown")
            )
        })
    }
}

#[async_trait]
impl ContentRepository for GeminiContentRepository {
    async fn research(&self, prompt: &str) -> Result<String, String> {
        self.generate(GenerateContentRequest::grounded(prompt)).await
    }

    async fn draft_script(&self, prompt: &str) -> Result<String, String> {
        self.generate(GenerateContentRequest::text(prompt)).await
    }
}
