use super::model::{Feed, FeedChannel};
use super::rss::derive_feed;
use crate::domain::episode::{EpisodeHistory, StoreError};
use crate::infrastructure::repositories::FeedRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct FeedPublisher {
    feed_repo: Arc<FeedRepository>,
    channel: FeedChannel,
    base_url: String,
}

impl FeedPublisher {
    pub fn new(feed_repo: Arc<FeedRepository>, channel: FeedChannel, base_url: String) -> Self {
        Self {
            feed_repo,
            channel,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
pub trait FeedPublisherApi: Send + Sync {
    /// Regenerate the whole feed from `history` and replace the published one
    async fn publish(
        &self,
        history: &EpisodeHistory,
        build_date: DateTime<Utc>,
    ) -> Result<Feed, StoreError>;
}

#[async_trait]
impl FeedPublisherApi for FeedPublisher {
    async fn publish(
        &self,
        history: &EpisodeHistory,
        build_date: DateTime<Utc>,
    ) -> Result<Feed, StoreError> {
        let feed = derive_feed(history, &self.channel, &self.base_url, build_date);
        self.feed_repo.save(&feed).await?;
        Ok(feed)
    }
}
