use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored value under {key:?} is corrupt: {reason}")]
    ReadCorrupt { key: String, reason: String },

    #[error("core error: {0}")]
    Core(#[from] cratedigger_core::CoreError),
}
