use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::error::StorageError;
use crate::memory::MemoryKvStore;
use crate::traits::{KvBackend, KvWrite};

/// Best-effort facade over a `KvBackend`.
///
/// Reads and writes never fail from the caller's point of view: backend
/// errors are logged and dropped, missing keys read as `None`, and JSON that
/// no longer decodes is treated as absent. Callers that need to tell "empty"
/// from "corrupt" use [`Store::try_read_json`].
pub struct Store {
    backend: Box<dyn KvBackend>,
}

impl Store {
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryKvStore::new())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!(key, error = %e, "store read failed");
                None
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            error!(key, error = %e, "store write failed");
        }
    }

    pub fn remove(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            error!(key, error = %e, "store remove failed");
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            error!(error = %e, "store key listing failed");
            Vec::new()
        })
    }

    /// Decode the JSON under `key`. `Ok(None)` when the key is absent,
    /// `StorageError::ReadCorrupt` when the stored text does not decode.
    pub fn try_read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::ReadCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Like [`Store::try_read_json`] but absent and corrupt both come back as `None`.
    pub fn read_json_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_read_json(key) {
            Ok(value) => value,
            Err(e @ StorageError::ReadCorrupt { .. }) => {
                warn!(key, error = %e, "discarding unreadable stored value");
                None
            }
            Err(e) => {
                error!(key, error = %e, "store read failed");
                None
            }
        }
    }

    /// Decoded value, or `T::default()` when absent or unreadable.
    pub fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read_json_opt(key).unwrap_or_default()
    }

    pub fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(encoded) => self.set(key, &encoded),
            Err(e) => error!(key, error = %e, "could not encode value for store"),
        }
    }

    /// Hand several writes to the backend as one unit.
    pub fn write_batch(&mut self, writes: &[KvWrite]) {
        if let Err(e) = self.backend.write_batch(writes) {
            let keys: Vec<&str> = writes.iter().map(KvWrite::key).collect();
            error!(?keys, error = %e, "store batch write failed");
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
