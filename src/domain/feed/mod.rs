pub mod model;
pub mod rss;
pub mod service;

pub use model::{Feed, FeedChannel, FeedItem};
pub use rss::derive_feed;
pub use service::{FeedPublisher, FeedPublisherApi};
