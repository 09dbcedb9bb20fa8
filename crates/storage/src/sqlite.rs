use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Transaction};

use crate::error::StorageError;
use crate::traits::{KvBackend, KvWrite};

const UPSERT_SQL: &str = "INSERT INTO kv (key, value, updated_at)
     VALUES (?1, ?2, CAST(unixepoch('now','subsec') * 1000 AS INTEGER))
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const DELETE_SQL: &str = "DELETE FROM kv WHERE key = ?1";

pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn apply_write(tx: &Transaction, write: &KvWrite) -> Result<(), StorageError> {
    match write {
        KvWrite::Set { key, value } => {
            tx.execute(UPSERT_SQL, rusqlite::params![key, value])?;
        }
        KvWrite::Remove { key } => {
            tx.execute(DELETE_SQL, rusqlite::params![key])?;
        }
    }
    Ok(())
}

impl KvBackend for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(UPSERT_SQL, rusqlite::params![key, value])?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn.execute(DELETE_SQL, rusqlite::params![key])?;
        Ok(())
    }

    fn write_batch(&mut self, writes: &[KvWrite]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        for write in writes {
            apply_write(&tx, write)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

impl std::fmt::Debug for SqliteKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteKvStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_remove_deletes() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("cart", "[]").unwrap();
        store.set("cart", "[1]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        // removing again is fine
        store.remove("cart").unwrap();
    }

    #[test]
    fn batch_applies_in_order() {
        let mut store = SqliteKvStore::open_in_memory().unwrap();
        store.set("cart", "[1,2]").unwrap();
        store
            .write_batch(&[
                KvWrite::set("userCollection", "[1,2]"),
                KvWrite::remove("cart"),
            ])
            .unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        assert_eq!(
            store.get("userCollection").unwrap().as_deref(),
            Some("[1,2]")
        );
        assert_eq!(store.keys().unwrap(), vec!["userCollection".to_string()]);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");

        {
            let mut store = SqliteKvStore::open(&path).unwrap();
            store.set("albumDraft", r#"{"currentStep":2}"#).unwrap();
        }

        let store = SqliteKvStore::open(&path).unwrap();
        assert_eq!(
            store.get("albumDraft").unwrap().as_deref(),
            Some(r#"{"currentStep":2}"#)
        );
    }

    #[test]
    fn schema_init_is_idempotent() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        crate::schema::init_schema(store.conn()).unwrap();
        let version: i32 = store
            .conn()
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::schema::SCHEMA_VERSION);
    }
}
