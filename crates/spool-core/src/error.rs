use thiserror::Error;

use crate::ports::StorageError;

#[derive(Debug, Error)]
pub enum SpoolError {
    #[error("invalid item {0:?}: items must be non-empty and contain no line breaks")]
    InvalidItem(String),

    #[error("invalid storage name {0:?}")]
    InvalidStorageName(String),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("config: {0}")]
    Config(String),
}
