#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("segment {position} failed after {attempts} attempts: {cause}")]
    RetriesExhausted {
        position: usize,
        attempts: u32,
        cause: String,
    },
    #[error("run deadline passed before segment {position} of {total}")]
    DeadlineExceeded { position: usize, total: usize },
}
