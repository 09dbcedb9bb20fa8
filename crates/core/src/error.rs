use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
