pub mod ffmpeg;

use crate::domain::audio::{DiagnosticTone, EncodingError, RawAudioStream};
use async_trait::async_trait;
use std::path::Path;

pub use ffmpeg::FfmpegEncoder;

/// External encoder turning assembled raw audio into the published file.
///
/// Implementations are responsible for:
/// - Using the raw stream's fixed format parameters verbatim
/// - Producing exactly one output file at `output`
/// - Reporting any failure as an `EncodingError`
#[async_trait]
pub trait AudioEncoder: Send + Sync {
    /// Encode a fully written raw stream into `output`
    async fn encode(&self, raw: &RawAudioStream, output: &Path) -> Result<(), EncodingError>;

    /// Render the diagnostic tone straight into `output`
    async fn render_tone(&self, tone: &DiagnosticTone, output: &Path) -> Result<(), EncodingError>;
}
