use super::error::{ResearchError, ScriptingError};
use super::model::ResearchReport;
use super::prompts::{research_prompt, script_prompt, ShowProfile};
use crate::domain::script::Script;
use crate::infrastructure::repositories::ContentRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

pub struct ContentService {
    content_repo: Arc<dyn ContentRepository>,
    topics: Vec<String>,
    profile: ShowProfile,
}

impl ContentService {
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        topics: Vec<String>,
        profile: ShowProfile,
    ) -> Self {
        Self {
            content_repo,
            topics,
            profile,
        }
    }
}

#[async_trait]
pub trait ContentServiceApi: Send + Sync {
    /// Gather the day's briefing for the configured topics, steering away
    /// from the `covered` headlines of recent episodes
    async fn research(
        &self,
        today: NaiveDate,
        covered: &[String],
    ) -> Result<ResearchReport, ResearchError>;

    /// Turn a briefing into a two-host dialogue script
    async fn draft_script(&self, report: &ResearchReport) -> Result<Script, ScriptingError>;
}

#[async_trait]
impl ContentServiceApi for ContentService {
    async fn research(
        &self,
        today: NaiveDate,
        covered: &[String],
    ) -> Result<ResearchReport, ResearchError> {
        let start_time = Instant::now();
        tracing::info!(
            topic_count = self.topics.len(),
            excluded_count = covered.len(),
            "Gathering research"
        );

        let prompt = research_prompt(&self.topics, today, covered);
        let raw = self.content_repo.research(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Research request failed");
            ResearchError::Dependency(e)
        })?;

        let report = ResearchReport::parse(&raw);
        if report.text.is_empty() {
            tracing::error!("Research returned an empty briefing");
            return Err(ResearchError::EmptyReport);
        }

        tracing::info!(
            briefing_chars = report.text.chars().count(),
            headlines = ?report.headlines,
            auto_injected = ?report.auto_injected,
            suggestions = ?report.suggestions,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Research complete"
        );

        Ok(report)
    }

    async fn draft_script(&self, report: &ResearchReport) -> Result<Script, ScriptingError> {
        let start_time = Instant::now();

        let prompt = script_prompt(&self.profile, &report.text);
        let text = self.content_repo.draft_script(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Script drafting request failed");
            ScriptingError::Dependency(e)
        })?;

        let script = Script::new(text);
        if script.is_blank() {
            tracing::error!("Drafting returned an empty script");
            return Err(ScriptingError::EmptyScript);
        }

        tracing::info!(
            script_chars = script.as_str().chars().count(),
            delimiter_count = script.as_str().matches(self.profile.delimiter.as_str()).count(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Script drafted"
        );

        Ok(script)
    }
}
