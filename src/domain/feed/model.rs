use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel-level metadata of the published podcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedChannel {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub language: String,
    pub category: String,
}

impl Default for FeedChannel {
    fn default() -> Self {
        Self {
            title: "AI Daily Pulse: Deep Dive".to_string(),
            author: "AI Daily Pulse".to_string(),
            summary: "Your daily 15-minute conversational deep dive into the latest AI developments."
                .to_string(),
            description: "Automated daily AI intelligence briefing.".to_string(),
            owner_name: "AI Daily Pulse Broadcast".to_string(),
            owner_email: "broadcast@example.org".to_string(),
            language: "en-us".to_string(),
            category: "Technology".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub guid: String,
    pub title: String,
    pub pub_date: DateTime<Utc>,
    pub enclosure_url: String,
    pub headlines: Vec<String>,
    pub duration_secs: Option<u64>,
}

/// Public feed document, derived in full from the episode history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub channel: FeedChannel,
    pub link: String,
    pub image_url: String,
    pub last_build_date: DateTime<Utc>,
    pub items: Vec<FeedItem>,
}
