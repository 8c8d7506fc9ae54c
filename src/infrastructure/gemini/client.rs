use super::types::{GenerateContentRequest, GenerateContentResponse};
use std::time::{Duration, Instant};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Thin client for the `generateContent` endpoint
pub struct GeminiClient {
    api_base: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client,
        })
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        let start_time = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                model = %model,
                status = status.as_u16(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Gemini request rejected"
            );
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        tracing::debug!(
            model = %model,
            candidate_count = parsed.candidates.len(),
            finish_reason = ?parsed.finish_reason(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Gemini request completed"
        );

        Ok(parsed)
    }
}
