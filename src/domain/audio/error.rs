use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("no audio to assemble")]
    Empty,
    #[error("chunk {position} arrived after chunk {previous}")]
    OutOfOrder { position: usize, previous: usize },
    #[error("failed to write raw audio to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("failed to launch encoder '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encoder exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("encoder produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("failed to prepare output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
