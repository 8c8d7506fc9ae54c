pub mod content_repository;
pub mod episode_repository;
pub mod feed_repository;
pub mod gemini_content_repository;
pub mod gemini_tts_repository;
pub mod tts_repository;

pub use content_repository::ContentRepository;
pub use episode_repository::EpisodeRepository;
pub use feed_repository::FeedRepository;
pub use gemini_content_repository::{GeminiContentRepository, DEFAULT_TEXT_MODEL};
pub use gemini_tts_repository::{GeminiTtsRepository, DEFAULT_TTS_MODEL};
pub use tts_repository::TtsRepository;
