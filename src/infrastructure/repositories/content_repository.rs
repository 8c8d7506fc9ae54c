use async_trait::async_trait;

/// Text generation backend for the research and drafting stages
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Answer `prompt` with web search grounding enabled
    async fn research(&self, prompt: &str) -> Result<String, String>;

    async fn draft_script(&self, prompt: &str) -> Result<String, String>;
}
