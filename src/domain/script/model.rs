use serde::{Deserialize, Serialize};

/// Drafted episode script, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// One speech-service-sized unit of script text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 0-based position in the episode
    pub position: usize,
    /// Index of the delimiter-separated fragment this piece came from
    pub fragment: usize,
    /// Fragment text before phonetic correction
    pub source: String,
    /// Corrected text sent to the speech service
    pub text: String,
}
