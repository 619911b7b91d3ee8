use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::types::Like;

/// Key under which the liked recipes are kept in the storage file.
pub const LIKES_KEY: &str = "likes";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence port for the likes collection.
pub trait LikesStore: Send {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Like>>, StorageError>;
    fn save(&self, likes: &[Like]) -> Result<(), StorageError>;
}

type StorageData = BTreeMap<String, serde_json::Value>;

/// Key-value JSON file. Only the `likes` key is owned by this store, any
/// other keys found in the file are written back untouched.
pub struct FileLikesStore {
    storage_path: PathBuf,
}

impl FileLikesStore {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".recipe-finder").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn read_all(&self) -> Result<StorageData, StorageError> {
        if !self.storage_path.exists() {
            return Ok(StorageData::new());
        }
        let contents = fs::read_to_string(&self.storage_path)?;
        if contents.trim().is_empty() {
            return Ok(StorageData::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write through a temporary file and an atomic rename to avoid partial
    /// writes.
    fn write_all(&self, data: &StorageData) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.storage_path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(data)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.storage_path)?;
        Ok(())
    }
}

impl LikesStore for FileLikesStore {
    fn load(&self) -> Result<Option<Vec<Like>>, StorageError> {
        let data = self.read_all()?;
        match data.get(LIKES_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn save(&self, likes: &[Like]) -> Result<(), StorageError> {
        let mut data = self.read_all()?;
        data.insert(LIKES_KEY.to_string(), serde_json::to_value(likes)?);
        self.write_all(&data)
    }
}

/// In-process store holding the serialized collection. Clones share the same
/// slot, so a clone handed to a new `Likes` behaves like a reload.
#[derive(Clone, Default)]
pub struct MemoryLikesStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryLikesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized value currently held, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl LikesStore for MemoryLikesStore {
    fn load(&self) -> Result<Option<Vec<Like>>, StorageError> {
        match self.raw() {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, likes: &[Like]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(likes)?;
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw);
        }
        Ok(())
    }
}
