use super::AudioEncoder;
use crate::domain::audio::{DiagnosticTone, EncodingError, RawAudioStream};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Fixed MP3 bitrate of every published episode
const MP3_BITRATE: &str = "128k";

/// Encodes with a local `ffmpeg` binary
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn encode_args(raw: &RawAudioStream, output: &Path) -> Vec<String> {
        let format = raw.format();
        vec![
            "-y".to_string(),
            "-f".to_string(),
            format.ffmpeg_sample_format().to_string(),
            "-ar".to_string(),
            format.sample_rate.to_string(),
            "-ac".to_string(),
            format.channels.to_string(),
            "-i".to_string(),
            raw.path().display().to_string(),
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            "-ab".to_string(),
            MP3_BITRATE.to_string(),
            output.display().to_string(),
        ]
    }

    fn tone_args(tone: &DiagnosticTone, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            format!(
                "sine=frequency={}:duration={}",
                tone.frequency_hz,
                tone.duration.as_secs()
            ),
            "-acodec".to_string(),
            "libmp3lame".to_string(),
            "-ab".to_string(),
            MP3_BITRATE.to_string(),
            output.display().to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>, output: &Path) -> Result<(), EncodingError> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| EncodingError::OutputDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let start_time = std::time::Instant::now();
        tracing::info!(
            program = %self.program,
            args = ?args,
            "Invoking encoder"
        );

        let result = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| {
                tracing::error!(program = %self.program, error = %source, "Failed to launch encoder");
                EncodingError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            // ffmpeg prints its banner first; the cause is at the end
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(5)..].join("\n");

            tracing::error!(
                program = %self.program,
                status = %result.status,
                stderr = %tail,
                "Encoder failed"
            );
            return Err(EncodingError::Failed {
                status: result.status.to_string(),
                stderr: tail,
            });
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(EncodingError::MissingOutput(output.to_path_buf()));
        }

        tracing::info!(
            output = %output.display(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Encoding completed"
        );

        Ok(())
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl AudioEncoder for FfmpegEncoder {
    async fn encode(&self, raw: &RawAudioStream, output: &Path) -> Result<(), EncodingError> {
        tracing::info!(
            raw = %raw.path().display(),
            raw_size_bytes = raw.byte_len(),
            sample_rate = raw.format().sample_rate,
            channels = raw.format().channels,
            "Encoding raw audio to MP3"
        );
        self.run(Self::encode_args(raw, output), output).await
    }

    async fn render_tone(&self, tone: &DiagnosticTone, output: &Path) -> Result<(), EncodingError> {
        tracing::info!(
            frequency_hz = tone.frequency_hz,
            duration_secs = tone.duration.as_secs(),
            "Rendering diagnostic tone"
        );
        self.run(Self::tone_args(tone, output), output).await
    }
}
