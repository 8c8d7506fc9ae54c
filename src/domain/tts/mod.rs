pub mod error;
pub mod retry;
pub mod service;
pub mod voices;

pub use error::SynthesisError;
pub use retry::{RetryExhausted, RetryPolicy};
pub use service::{SynthesizerApi, SynthesizerClient};
pub use voices::{SpeakerVoice, VoiceAssignment};
