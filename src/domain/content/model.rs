use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

const METADATA_MARKER: &str = "[METADATA]";

static TOP_STORIES: LazyLock<Regex> = LazyLock::new(|| metadata_line("TOP_STORIES"));
static AUTO_INJECTED: LazyLock<Regex> = LazyLock::new(|| metadata_line("AUTO_INJECTED"));
static SUGGESTIONS: LazyLock<Regex> = LazyLock::new(|| metadata_line("SUGGESTIONS"));

fn metadata_line(key: &str) -> Regex {
    Regex::new(&format!(r"(?m){}:[ \t]*(.*)$", key)).expect("metadata line pattern is valid")
}

/// Research briefing plus the metadata block the model appends to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchReport {
    pub text: String,
    pub headlines: Vec<String>,
    pub auto_injected: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ResearchReport {
    /// Split a raw model response at `[METADATA]`.
    ///
    /// Everything before the marker is the briefing. A missing marker or a
    /// missing line yields an empty list.
    pub fn parse(raw: &str) -> Self {
        let (text, metadata) = match raw.split_once(METADATA_MARKER) {
            Some((text, metadata)) => (text, metadata),
            None => (raw, ""),
        };

        Self {
            text: text.trim().to_string(),
            headlines: list_entry(&TOP_STORIES, metadata),
            auto_injected: list_entry(&AUTO_INJECTED, metadata),
            suggestions: list_entry(&SUGGESTIONS, metadata),
        }
    }

    pub fn lead_headline(&self) -> Option<&str> {
        self.headlines.first().map(String::as_str)
    }
}

fn list_entry(pattern: &Regex, metadata: &str) -> Vec<String> {
    let Some(line) = pattern.captures(metadata).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    line.as_str()
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
