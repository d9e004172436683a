//! Storage port for the history store.
//!
//! The store talks to persistence through this small capability trait so
//! tests can swap the on-disk file for an in-memory fake.

use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read history: {0}")]
    Read(std::io::Error),

    #[error("failed to write history: {0}")]
    Write(std::io::Error),

    #[error("failed to encode history: {0}")]
    Encode(serde_json::Error),
}

/// Minimal get/set/remove capability over one persisted blob.
pub trait StoragePort: Send {
    /// Load the persisted blob, `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted blob with `data`.
    fn save(&self, data: &str) -> Result<(), StorageError>;

    /// Remove the persisted blob entirely.
    fn clear(&self) -> Result<(), StorageError>;
}

/// History persisted as a single JSON file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StoragePort for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(StorageError::Read)
    }

    fn save(&self, data: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Write)?;
        }
        std::fs::write(&self.path, data).map_err(StorageError::Write)
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(e)),
        }
    }
}

/// In-memory fake for tests.
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the fake with persisted content.
    pub fn with_contents(data: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(data.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.blob.lock().unwrap().clone()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.blob.lock().unwrap().clone())
    }

    fn save(&self, data: &str) -> Result<(), StorageError> {
        *self.blob.lock().unwrap() = Some(data.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.blob.lock().unwrap() = None;
        Ok(())
    }
}
