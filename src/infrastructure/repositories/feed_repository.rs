use crate::domain::episode::StoreError;
use crate::domain::feed::Feed;
use crate::infrastructure::state::write_atomic;
use std::path::{Path, PathBuf};

/// Published RSS document on disk
pub struct FeedRepository {
    path: PathBuf,
}

impl FeedRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, feed: &Feed) -> Result<(), StoreError> {
        let xml = feed.to_xml();

        write_atomic(&self.path, xml.as_bytes())
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            item_count = feed.items.len(),
            bytes = xml.len(),
            "Feed written"
        );

        Ok(())
    }
}
