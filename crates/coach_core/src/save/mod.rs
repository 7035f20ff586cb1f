// Snapshot persistence for the composition models
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod store;

pub use error::SaveError;
pub use format::{
    current_timestamp, decompress_and_deserialize, serialize_and_compress, SnapshotEnvelope,
};
pub use store::{FileStore, MemoryStore, SnapshotStore};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;
