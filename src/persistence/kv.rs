//! Key-value backends for the workspace blob.

use super::PersistenceError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Minimal string key-value storage
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one
    fn store(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        Ok(Some(contents))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        // Write to a temp file then rename so a crash never leaves a torn blob
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(io_error(&temp_path))?;
        std::fs::rename(&temp_path, &path).map_err(io_error(&path))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path).map_err(io_error(&path))?;
        }
        Ok(())
    }
}

/// Shared in-memory map; clones see the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).store(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
