#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("research request failed: {0}")]
    Dependency(String),
    #[error("research report is empty")]
    EmptyReport,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptingError {
    #[error("script drafting failed: {0}")]
    Dependency(String),
    #[error("drafted script is empty")]
    EmptyScript,
    #[error("script has no speakable segments")]
    NoSegments,
}
