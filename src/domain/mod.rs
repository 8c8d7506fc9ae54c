pub mod audio;
pub mod content;
pub mod episode;
pub mod feed;
pub mod pipeline;
pub mod script;
pub mod tts;
