use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkeinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid digest size: {0} bytes. Must be at least 1 and fit in a 64-bit bit count")]
    InvalidDigestSize(usize),

    #[error("Output buffer is {actual} bytes, digest size is {expected} bytes")]
    OutputSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Malformed checksum line {0}")]
    InvalidChecksumLine(usize),
}

pub type Result<T> = std::result::Result<T, SkeinError>;
