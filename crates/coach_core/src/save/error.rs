use crate::error::CompositionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Snapshot rejected: {0}")]
    Rejected(#[from] CompositionError),
}

impl SaveError {
    /// Whether retrying (or asking the user to fix input) can succeed without
    /// discarding the stored data.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            // Catalog may have changed since the save; the data itself is intact
            SaveError::Rejected(_) => true,
            SaveError::Corrupted => false,
            SaveError::ChecksumMismatch => false,
            SaveError::VersionMismatch { .. } => false,
            _ => false,
        }
    }
}
