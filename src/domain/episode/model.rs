use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One produced broadcast, as persisted in `episodes.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub audio_url: String,
    #[serde(default)]
    pub main_stories: Vec<String>,
    /// Playback length of the encoded audio, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl Episode {
    pub fn new(
        created_at: DateTime<Utc>,
        title: impl Into<String>,
        audio_url: impl Into<String>,
        main_stories: Vec<String>,
    ) -> Self {
        Self {
            id: episode_id(created_at),
            date: created_at,
            title: title.into(),
            audio_url: audio_url.into(),
            main_stories,
            duration_secs: None,
        }
    }

    pub fn with_duration(mut self, duration_secs: u64) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }
}

/// Episode ids are the creation time in epoch milliseconds
pub fn episode_id(created_at: DateTime<Utc>) -> String {
    created_at.timestamp_millis().to_string()
}

/// Newest-first, bounded list of episodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeHistory(Vec<Episode>);

impl EpisodeHistory {
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self(episodes)
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Episode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&Episode> {
        self.0.first()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|e| e.id == id)
    }

    /// Headlines of the `episodes` most recent entries, newest first,
    /// without repeats
    pub fn recent_headlines(&self, episodes: usize) -> Vec<String> {
        let mut headlines: Vec<String> = Vec::new();
        for story in self.0.iter().take(episodes).flat_map(|e| &e.main_stories) {
            if !headlines.contains(story) {
                headlines.push(story.clone());
            }
        }
        headlines
    }

    pub fn into_inner(self) -> Vec<Episode> {
        self.0
    }
}

/// Prepend `episode`, then evict the oldest entries beyond `cap`.
///
/// Existing episodes are never modified. Recording an id that is already
/// present returns the history unchanged, apart from the cap.
pub fn record_episode(history: EpisodeHistory, episode: Episode, cap: usize) -> EpisodeHistory {
    let mut episodes = history.into_inner();

    if episodes.iter().any(|e| e.id == episode.id) {
        tracing::warn!(episode_id = %episode.id, "Episode already recorded, skipping insert");
    } else {
        episodes.insert(0, episode);
    }

    if episodes.len() > cap {
        let evicted = episodes.len() - cap;
        episodes.truncate(cap);
        tracing::info!(evicted = evicted, cap = cap, "Evicted oldest episodes");
    }

    EpisodeHistory(episodes)
}
