//! # Storage
//!
//! Key-value persistence behind the [`KeyValueStore`] port. The app keeps
//! three independent keys, each holding one JSON document:
//!
//! | Key            | Value                                |
//! |----------------|--------------------------------------|
//! | `vocabList`    | `[{"entry": "...", "tag": "..."}]`   |
//! | `scoreHistory` | `[{"date": "...", "score": 3}]`      |
//! | `darkMode`     | `true` / `false`                     |
//!
//! [`FileStore`] maps each key to `<dir>/<key>.json`. All writes use atomic
//! rename (write `.tmp`, then `rename()`) for crash safety.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const VOCAB_LIST_KEY: &str = "vocabList";
pub const SCORE_HISTORY_KEY: &str = "scoreHistory";
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("no home directory to keep data in")]
    NoDataDir,
}

/// A string-keyed store of string values.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and decodes a JSON value stored under `key`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    store.set(key, &json)
}

/// Copies the raw value under `key` to `<key>.corrupt` so a later write to
/// `key` cannot destroy it. Returns the backup key.
pub fn set_aside(store: &dyn KeyValueStore, key: &str) -> Result<String, StorageError> {
    let backup = format!("{key}.corrupt");
    if let Some(raw) = store.get(key)? {
        store.set(&backup, &raw)?;
    }
    Ok(backup)
}

/// Returns `~/.vocab/`.
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    dirs::home_dir()
        .map(|home| home.join(".vocab"))
        .ok_or(StorageError::NoDataDir)
}

// ============================================================================
// File-backed store
// ============================================================================

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        atomic_write(&path, value)?;
        debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }
}

/// Atomically write `contents` to `path` (via `.tmp` + rename).
pub(crate) fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

// ============================================================================
// In-memory store
// ============================================================================

/// Volatile store for tests and dry runs. Writes can be made to fail to
/// exercise the unavailable-storage paths.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every `set` returns an I/O error and leaves the value untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::other("writes disabled")));
        }
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
