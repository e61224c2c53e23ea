use thiserror::Error;

#[derive(Debug, Error)]
pub enum PvzpakError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("no candidate XOR key satisfies the archive signature")]
    KeyNotFound,
    #[error("invalid signature {0:#010x} after decryption")]
    InvalidSignature(u32),
    #[error("archive truncated while reading {0}")]
    Truncated(&'static str),
    #[error("unrecognized input: validation for {0} failed")]
    ValidationError(&'static str),
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("no payload available for entry {0:?}")]
    MissingPayload(String),
    #[error("payload for {name:?} is {actual} bytes but the recorded size is {expected}")]
    SizeMismatch {
        name: String,
        expected: u32,
        actual: u64,
    },
    #[error("compressed entries are not supported")]
    UnsupportedCompression,
}
