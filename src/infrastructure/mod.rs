pub mod auth;
pub mod config;
pub mod encoder;
pub mod gemini;
pub mod http;
pub mod repositories;
pub mod state;
