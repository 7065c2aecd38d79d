mod profiles;

pub use profiles::{CurrentProfileCache, ProfileStore};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[cfg(feature = "rocksdb")]
use rocksdb::{DB, Options};
#[cfg(feature = "rocksdb")]
use std::sync::Arc;

/// Persisted key names.
pub mod keys {
    pub const PROFILES: &str = "profiles";
    pub const CURRENT_PROFILE: &str = "currentProfileData";
    /// Session-scoped marker set once the legacy reset has run.
    pub const DATA_CLEARED: &str = "dataCleared";

    pub const LEGACY_PROFILE_DATA: &str = "profileData";
    pub const LEGACY_SEARCH_COUNTS: &str = "profileSearchCounts";
    pub const LEGACY_USER_PROFILES: &str = "userProfiles";
    pub const LEGACY_SAVED_AVATARS: &str = "savedAvatars";
    pub const LEGACY_SETTINGS: &str = "profileSettings";

    pub const LEGACY: [&str; 5] = [
        LEGACY_PROFILE_DATA,
        LEGACY_SEARCH_COUNTS,
        LEGACY_USER_PROFILES,
        LEGACY_SAVED_AVATARS,
        LEGACY_SETTINGS,
    ];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[cfg(feature = "rocksdb")]
    #[error(transparent)]
    RocksDb(#[from] rocksdb::Error),
    #[error("stored value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage, shaped after browser `Storage`.
pub trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub(crate) fn read_json<T, B>(backend: &B, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    B: KvBackend + ?Sized,
{
    match backend.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub(crate) fn write_json<T, B>(backend: &B, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    B: KvBackend + ?Sized,
{
    let json = serde_json::to_string(value)?;
    backend.set(key, &json)
}

#[derive(Default)]
pub struct InMemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|guard| guard.contains_key(key))
            .unwrap_or(false)
    }
}

impl KvBackend for InMemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(feature = "rocksdb")]
pub struct RocksDbBackend {
    db: Arc<DB>,
}

#[cfg(feature = "rocksdb")]
impl RocksDbBackend {
    pub fn open_default(path: &str) -> Result<Self, StorageError> {
        let mut options = Options::default();
        options.create_if_missing(true);
        let db = DB::open(&options, path)?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[cfg(feature = "rocksdb")]
impl KvBackend for RocksDbBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(raw) => Ok(Some(String::from_utf8(raw)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.put(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db.delete(key.as_bytes())?;
        Ok(())
    }
}
