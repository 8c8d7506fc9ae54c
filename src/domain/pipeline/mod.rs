pub mod error;
pub mod orchestrator;
pub mod state;

pub use error::PipelineError;
pub use orchestrator::{audio_url, BroadcastPipeline, BroadcastSettings, RunFailure, RunMode, RunReport};
pub use state::{PipelineState, Transition};
