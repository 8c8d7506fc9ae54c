use super::error::StoreError;
use super::model::{record_episode, Episode, EpisodeHistory};
use crate::infrastructure::repositories::EpisodeRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable, bounded episode history
pub struct EpisodeStore {
    episode_repo: Arc<EpisodeRepository>,
    history_cap: usize,
}

impl EpisodeStore {
    pub fn new(episode_repo: Arc<EpisodeRepository>, history_cap: usize) -> Self {
        Self {
            episode_repo,
            history_cap: history_cap.max(1),
        }
    }
}

#[async_trait]
pub trait EpisodeStoreApi: Send + Sync {
    async fn history(&self) -> Result<EpisodeHistory, StoreError>;

    /// Read the history once, prepend `episode`, evict beyond the cap and
    /// write it back once. Returns the history that was written.
    ///
    /// An episode whose id is already stored is refused and nothing is
    /// written.
    async fn record(&self, episode: Episode) -> Result<EpisodeHistory, StoreError>;
}

#[async_trait]
impl EpisodeStoreApi for EpisodeStore {
    async fn history(&self) -> Result<EpisodeHistory, StoreError> {
        self.episode_repo.load().await
    }

    async fn record(&self, episode: Episode) -> Result<EpisodeHistory, StoreError> {
        let episode_id = episode.id.clone();
        let previous = self.episode_repo.load().await?;
        let previous_len = previous.len();

        if previous.contains(&episode_id) {
            tracing::error!(episode_id = %episode_id, "Episode id already recorded");
            return Err(StoreError::DuplicateEpisode { id: episode_id });
        }

        let history = record_episode(previous, episode, self.history_cap);
        self.episode_repo.save(&history).await?;

        tracing::info!(
            episode_id = %episode_id,
            previous_count = previous_len,
            episode_count = history.len(),
            history_cap = self.history_cap,
            "Episode recorded"
        );

        Ok(history)
    }
}
