use super::error::SaveError;
use super::SNAPSHOT_FORMAT_VERSION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

const CHECKSUM_LEN: usize = 32;

/// Versioned wrapper written around every stored snapshot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SnapshotEnvelope<S> {
    /// Format version for compatibility checks
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub payload: S,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    version: u32,
}

impl<S> SnapshotEnvelope<S> {
    pub fn new(payload: S) -> Self {
        Self { version: SNAPSHOT_FORMAT_VERSION, timestamp: current_timestamp(), payload }
    }
}

/// Serialize and compress a snapshot envelope
pub fn serialize_and_compress<S: Serialize>(
    envelope: &SnapshotEnvelope<S>,
) -> Result<Vec<u8>, SaveError> {
    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(envelope)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Verify, decompress and deserialize a snapshot envelope
pub fn decompress_and_deserialize<S: DeserializeOwned>(
    bytes: &[u8],
) -> Result<SnapshotEnvelope<S>, SaveError> {
    // Size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Check the version before the payload, whose shape may differ in newer formats
    let header: EnvelopeHeader = from_slice(&msgpack)?;
    if header.version > SNAPSHOT_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            found: header.version,
            expected: SNAPSHOT_FORMAT_VERSION,
        });
    }

    Ok(from_slice(&msgpack)?)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::{LineupSnapshot, SlotAssignment};

    fn sample_lineup() -> LineupSnapshot {
        LineupSnapshot {
            assignments: vec![
                SlotAssignment { slot_id: "gk-1".to_string(), player_id: "p4".to_string() },
                SlotAssignment { slot_id: "st-1".to_string(), player_id: "p9".to_string() },
            ],
            bench: vec!["p12".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let envelope = SnapshotEnvelope::new(sample_lineup());

        let bytes = serialize_and_compress(&envelope).unwrap();
        let decoded: SnapshotEnvelope<LineupSnapshot> = decompress_and_deserialize(&bytes).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_checksum_validation() {
        let envelope = SnapshotEnvelope::new(sample_lineup());
        let mut bytes = serialize_and_compress(&envelope).unwrap();

        // Corrupt the checksum
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }

        let result = decompress_and_deserialize::<LineupSnapshot>(&bytes);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_input() {
        let result = decompress_and_deserialize::<LineupSnapshot>(&[0u8; 10]);
        assert!(matches!(result, Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut envelope = SnapshotEnvelope::new(sample_lineup());
        envelope.version = SNAPSHOT_FORMAT_VERSION + 1;
        let bytes = serialize_and_compress(&envelope).unwrap();

        let result = decompress_and_deserialize::<LineupSnapshot>(&bytes);
        assert!(matches!(result, Err(SaveError::VersionMismatch { found: 2, expected: 1 })));
    }

    #[test]
    fn test_newer_version_with_changed_payload_reports_version() {
        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_FORMAT_VERSION + 1,
            timestamp: current_timestamp(),
            payload: vec!["gk-1:p4".to_string()],
        };
        let bytes = serialize_and_compress(&envelope).unwrap();

        let result = decompress_and_deserialize::<LineupSnapshot>(&bytes);
        assert!(matches!(result, Err(SaveError::VersionMismatch { found: 2, expected: 1 })));
    }
}
