use crate::domain::episode::{EpisodeHistory, StoreError};
use crate::infrastructure::state::write_atomic;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Episode history persisted as a pretty-printed JSON array
pub struct EpisodeRepository {
    path: PathBuf,
}

impl EpisodeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored history.
    ///
    /// A missing or zero-length file is the first-run case and yields an
    /// empty history. Anything else that cannot be read or parsed is an
    /// error; the caller must not overwrite it with a fresh history.
    pub async fn load(&self) -> Result<EpisodeHistory, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No episode history yet, starting empty");
                return Ok(EpisodeHistory::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if bytes.is_empty() {
            tracing::info!(path = %self.path.display(), "Episode history file is empty, starting empty");
            return Ok(EpisodeHistory::default());
        }

        let history: EpisodeHistory =
            serde_json::from_slice(&bytes).map_err(|source| {
                tracing::error!(
                    path = %self.path.display(),
                    error = %source,
                    "Episode history is corrupt"
                );
                StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;

        tracing::debug!(
            path = %self.path.display(),
            episode_count = history.len(),
            "Episode history loaded"
        );

        Ok(history)
    }

    pub async fn save(&self, history: &EpisodeHistory) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(history)?;

        write_atomic(&self.path, &json)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            episode_count = history.len(),
            "Episode history saved"
        );

        Ok(())
    }
}
