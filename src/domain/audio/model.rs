use std::path::{Path, PathBuf};
use std::time::Duration;

/// Raw PCM layout produced by the speech service and expected by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// 24 kHz, mono, signed 16-bit little-endian
    pub const PCM_S16LE_24K_MONO: AudioFormat = AudioFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
    };

    pub fn bytes_per_frame(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize / 8)
    }

    /// ffmpeg `-f` name of the raw sample format
    pub fn ffmpeg_sample_format(&self) -> &'static str {
        match self.bits_per_sample {
            8 => "u8",
            24 => "s24le",
            32 => "s32le",
            _ => "s16le",
        }
    }

    pub fn duration_secs(&self, byte_len: u64) -> f64 {
        let bytes_per_second = self.sample_rate as u64 * self.bytes_per_frame() as u64;
        if bytes_per_second == 0 {
            return 0.0;
        }
        byte_len as f64 / bytes_per_second as f64
    }
}

/// Audio returned by one synthesis call for one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub position: usize,
    pub bytes: Vec<u8>,
}

impl AudioChunk {
    pub fn new(position: usize, bytes: Vec<u8>) -> Self {
        Self { position, bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fully written and closed raw audio file, ready for the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAudioStream {
    path: PathBuf,
    byte_len: u64,
    format: AudioFormat,
}

impl RawAudioStream {
    pub(crate) fn new(path: PathBuf, byte_len: u64, format: AudioFormat) -> Self {
        Self {
            path,
            byte_len,
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn duration_secs(&self) -> f64 {
        self.format.duration_secs(self.byte_len)
    }
}

/// Fixed test signal rendered instead of a produced episode in diagnostic runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticTone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Default for DiagnosticTone {
    fn default() -> Self {
        Self {
            frequency_hz: 440,
            duration: Duration::from_secs(30),
        }
    }
}
