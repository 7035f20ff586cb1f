use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SnapshotEnvelope};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Persistence collaborator for model snapshots.
///
/// The models never reach into ambient storage; the screen that owns a model
/// hands it a store when the user saves or loads.
pub trait SnapshotStore<S> {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<S>, SaveError>;

    fn save(&mut self, snapshot: &S) -> Result<(), SaveError>;
}

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore<S> {
    current: Option<S>,
    save_count: usize,
}

impl<S> Default for MemoryStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MemoryStore<S> {
    pub fn new() -> Self {
        Self { current: None, save_count: 0 }
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl<S: Clone> SnapshotStore<S> for MemoryStore<S> {
    fn load(&self) -> Result<Option<S>, SaveError> {
        Ok(self.current.clone())
    }

    fn save(&mut self, snapshot: &S) -> Result<(), SaveError> {
        self.current = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// Stores one snapshot per file using the compressed, checksummed envelope.
#[derive(Debug, Clone)]
pub struct FileStore<S> {
    path: PathBuf,
    _snapshot: PhantomData<fn() -> S>,
}

impl<S> FileStore<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _snapshot: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        if self.path.exists() {
            remove_file(&self.path)?;
            log::info!("Deleted snapshot {:?}", self.path);
        }
        Ok(())
    }

    /// Timestamp of the stored envelope without keeping the payload.
    pub fn saved_at(&self) -> Result<Option<u64>, SaveError>
    where
        S: DeserializeOwned,
    {
        Ok(self.read_envelope()?.map(|envelope| envelope.timestamp))
    }

    fn read_envelope(&self) -> Result<Option<SnapshotEnvelope<S>>, SaveError>
    where
        S: DeserializeOwned,
    {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&self.path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let envelope = decompress_and_deserialize(&data)?;
        log::debug!("Loaded {} bytes from {:?}", data.len(), self.path);
        Ok(Some(envelope))
    }
}

impl<S: Serialize + DeserializeOwned> SnapshotStore<S> for FileStore<S> {
    fn load(&self) -> Result<Option<S>, SaveError> {
        Ok(self.read_envelope()?.map(|envelope| envelope.payload))
    }

    fn save(&mut self, snapshot: &S) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(&SnapshotEnvelope::new(snapshot))?;

        // Atomic save: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        log::info!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::{TimelineSnapshot, TimelineSnapshotItem};
    use tempfile::TempDir;

    fn sample() -> TimelineSnapshot {
        TimelineSnapshot {
            items: vec![
                TimelineSnapshotItem { bundle_id: "warmup".to_string(), duration_minutes: 15 },
                TimelineSnapshotItem { bundle_id: "rondo".to_string(), duration_minutes: 30 },
            ],
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store: MemoryStore<TimelineSnapshot> = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert_eq!(store.save_count(), 1);

        store.clear();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store: FileStore<TimelineSnapshot> =
            FileStore::new(temp_dir.path().join("sessions").join("current.dat"));

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.exists());

        store.save(&sample()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert!(store.saved_at().unwrap().is_some());

        // Temp file should not exist
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_file_store_detects_corruption() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lineup.dat");
        let mut store: FileStore<TimelineSnapshot> = FileStore::new(&path);
        store.save(&sample()).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[6] ^= 0xFF;
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(store.load(), Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut store: FileStore<TimelineSnapshot> = FileStore::new(temp_dir.path().join("x.dat"));
        store.save(&sample()).unwrap();

        store.delete().unwrap();
        assert!(!store.exists());
        // Deleting twice is fine
        store.delete().unwrap();
    }
}
