//! Durable key-value storage for shopper state.
//!
//! Each key holds one JSON document. [`FileStorage`] keeps one file per key
//! under a data directory; [`MemoryStorage`] is for tests and throwaway
//! sessions.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Persisted keys.
pub mod keys {
    /// Cart line items.
    pub const CART_ITEMS: &str = "cartItems";
    /// Sum of cart quantities.
    pub const CART_COUNT: &str = "cartCount";
    /// Whether a user is logged in.
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    /// Profile of the logged-in user. Absent when logged out.
    pub const CURRENT_USER: &str = "currentUser";
    /// Registered accounts.
    pub const SIGNUP_USERS: &str = "signupUsers";

    /// Every key the client writes.
    pub const ALL: [&str; 5] = [
        CART_ITEMS,
        CART_COUNT,
        IS_AUTHENTICATED,
        CURRENT_USER,
        SIGNUP_USERS,
    ];
}

/// Errors that can occur while reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded.
    #[error("stored value for '{key}' is invalid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw key-value storage of JSON text.
pub trait Storage: Send + Sync {
    /// Read the raw JSON stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store raw JSON under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the stored JSON does not decode as `T`.
pub fn load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Encode and store `value` under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or writing fails.
pub fn save<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Corrupt {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, &raw)
}

/// Remove every key the client writes.
///
/// # Errors
///
/// Returns the first `StorageError` encountered.
pub fn clear_all(storage: &dyn Storage) -> Result<(), StorageError> {
    keys::ALL.iter().try_for_each(|key| storage.remove(key))
}

// =============================================================================
// FileStorage
// =============================================================================

/// One `<key>.json` file per key under a directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state"));

        assert!(storage.get(keys::CART_COUNT).unwrap().is_none());
        save(&storage, keys::CART_COUNT, &3u32).unwrap();

        assert!(dir.path().join("state").join("cartCount.json").exists());
        assert_eq!(load::<u32>(&storage, keys::CART_COUNT).unwrap(), Some(3));

        storage.remove(keys::CART_COUNT).unwrap();
        assert!(storage.get(keys::CART_COUNT).unwrap().is_none());
        // Removing twice is fine
        storage.remove(keys::CART_COUNT).unwrap();
    }

    #[test]
    fn test_corrupt_value_reports_key() {
        let storage = MemoryStorage::new();
        storage.set(keys::IS_AUTHENTICATED, "{not json").unwrap();

        let err = load::<bool>(&storage, keys::IS_AUTHENTICATED).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == "isAuthenticated"));
    }

    #[test]
    fn test_clear_all_removes_every_key() {
        let storage = MemoryStorage::new();
        for key in keys::ALL {
            storage.set(key, "null").unwrap();
        }
        clear_all(&storage).unwrap();
        assert!(keys::ALL.iter().all(|key| !storage.contains(key)));
    }
}
