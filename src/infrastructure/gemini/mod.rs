pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiError, DEFAULT_API_BASE};
pub use types::{GenerateContentRequest, GenerateContentResponse};
