use super::error::AssemblyError;
use super::model::{AudioChunk, AudioFormat, RawAudioStream};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Appends synthesized chunks, in segment order, into one raw PCM file.
///
/// Raw PCM carries no chunk boundaries, so a misordered append would be
/// inaudible to every check downstream. `append` rejects any chunk whose
/// position does not follow the previous one.
pub struct AudioAssembler {
    path: PathBuf,
    format: AudioFormat,
    writer: BufWriter<File>,
    bytes_written: u64,
    last_position: Option<usize>,
}

impl AudioAssembler {
    pub async fn create(path: impl Into<PathBuf>, format: AudioFormat) -> Result<Self, AssemblyError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(&path, source))?;
        }

        let file = File::create(&path)
            .await
            .map_err(|source| io_error(&path, source))?;

        tracing::debug!(path = %path.display(), "Raw audio file created");

        Ok(Self {
            path,
            format,
            writer: BufWriter::new(file),
            bytes_written: 0,
            last_position: None,
        })
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Append one chunk. The chunk is consumed; its bytes now live in the file.
    pub async fn append(&mut self, chunk: AudioChunk) -> Result<(), AssemblyError> {
        if let Some(previous) = self.last_position {
            if chunk.position <= previous {
                return Err(AssemblyError::OutOfOrder {
                    position: chunk.position,
                    previous,
                });
            }
        }

        if chunk.len() % self.format.bytes_per_frame() != 0 {
            tracing::warn!(
                position = chunk.position,
                chunk_size = chunk.len(),
                bytes_per_frame = self.format.bytes_per_frame(),
                "Chunk is not frame aligned"
            );
        }

        self.writer
            .write_all(&chunk.bytes)
            .await
            .map_err(|source| io_error(&self.path, source))?;

        self.bytes_written += chunk.len() as u64;
        self.last_position = Some(chunk.position);

        tracing::debug!(
            position = chunk.position,
            chunk_size = chunk.len(),
            total_audio_size = self.bytes_written,
            "Chunk appended"
        );

        Ok(())
    }

    /// Flush, sync and close the file. The returned stream is safe to hand
    /// to the encoder.
    pub async fn finish(self) -> Result<RawAudioStream, AssemblyError> {
        let Self {
            path,
            format,
            mut writer,
            bytes_written,
            ..
        } = self;

        writer
            .flush()
            .await
            .map_err(|source| io_error(&path, source))?;

        let file = writer.into_inner();
        file.sync_all()
            .await
            .map_err(|source| io_error(&path, source))?;
        drop(file);

        if bytes_written == 0 {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(AssemblyError::Empty);
        }

        let stream = RawAudioStream::new(path, bytes_written, format);

        tracing::info!(
            path = %stream.path().display(),
            audio_size_bytes = stream.byte_len(),
            duration_secs = format!("{:.1}", stream.duration_secs()),
            "Raw audio assembled"
        );

        Ok(stream)
    }
}

/// Write `chunks` in order to `path` and close the file
pub async fn assemble(
    path: impl Into<PathBuf>,
    format: AudioFormat,
    chunks: Vec<AudioChunk>,
) -> Result<RawAudioStream, AssemblyError> {
    if chunks.is_empty() {
        return Err(AssemblyError::Empty);
    }

    let mut assembler = AudioAssembler::create(path, format).await?;
    for chunk in chunks {
        assembler.append(chunk).await?;
    }
    assembler.finish().await
}

fn io_error(path: &Path, source: std::io::Error) -> AssemblyError {
    AssemblyError::Io {
        path: path.to_path_buf(),
        source,
    }
}
