use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Stages of one broadcast run. Runs move strictly forward; `Completed`
/// and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Researching,
    Scripting,
    Synthesizing,
    Assembling,
    Encoding,
    Recording,
    Completed,
    Failed,
}

impl PipelineState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Researching => "researching",
            Self::Scripting => "scripting",
            Self::Synthesizing => "synthesizing",
            Self::Assembling => "assembling",
            Self::Encoding => "encoding",
            Self::Recording => "recording",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: PipelineState,
    pub to: PipelineState,
    pub at: DateTime<Utc>,
}
