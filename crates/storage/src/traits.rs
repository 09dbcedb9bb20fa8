use serde::Serialize;

use crate::error::StorageError;

/// One write inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

impl KvWrite {
    pub fn set(key: &str, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn remove(key: &str) -> Self {
        Self::Remove {
            key: key.to_string(),
        }
    }

    /// A `Set` carrying the JSON encoding of `value`.
    pub fn json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Self, StorageError> {
        let encoded =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self::set(key, encoded))
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// A synchronous string-keyed store. Backends may fail; the `Store` facade
/// is what turns those failures into best-effort behaviour.
pub trait KvBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Apply every write or none of them.
    fn write_batch(&mut self, writes: &[KvWrite]) -> Result<(), StorageError>;

    fn keys(&self) -> Result<Vec<String>, StorageError>;
}
