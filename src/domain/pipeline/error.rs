use crate::domain::audio::{AssemblyError, EncodingError};
use crate::domain::content::{ResearchError, ScriptingError};
use crate::domain::episode::StoreError;
use crate::domain::tts::SynthesisError;

/// Unrecovered failure that ends a broadcast run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Research(#[from] ResearchError),
    #[error(transparent)]
    Scripting(#[from] ScriptingError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Short failure kind for logs and the process exit report
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Research(_) => "ResearchError",
            Self::Scripting(_) => "ScriptingError",
            Self::Synthesis(_) => "SynthesisError",
            Self::Assembly(_) => "AssemblyError",
            Self::Encoding(_) => "EncodingError",
            Self::Store(_) => "StoreError",
        }
    }
}
