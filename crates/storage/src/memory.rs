use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::traits::{KvBackend, KvWrite};

/// Process-local backend. Nothing outlives the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvBackend for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn write_batch(&mut self, writes: &[KvWrite]) -> Result<(), StorageError> {
        for write in writes {
            match write {
                KvWrite::Set { key, value } => {
                    self.entries.insert(key.clone(), value.clone());
                }
                KvWrite::Remove { key } => {
                    self.entries.remove(key);
                }
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
