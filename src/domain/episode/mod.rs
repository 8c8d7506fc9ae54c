pub mod error;
pub mod model;
pub mod service;

pub use error::StoreError;
pub use model::{episode_id, record_episode, Episode, EpisodeHistory};
pub use service::{EpisodeStore, EpisodeStoreApi};
