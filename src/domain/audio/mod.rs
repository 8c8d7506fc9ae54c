pub mod assembler;
pub mod error;
pub mod model;

pub use assembler::{assemble, AudioAssembler};
pub use error::{AssemblyError, EncodingError};
pub use model::{AudioChunk, AudioFormat, DiagnosticTone, RawAudioStream};
