//! Persistence error types

use std::path::PathBuf;

/// Errors from the persisted settings backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot create settings directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}
