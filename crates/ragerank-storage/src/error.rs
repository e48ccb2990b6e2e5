//! Storage backend error types.

use std::path::PathBuf;

use ragerank_core::BoardError;
use thiserror::Error;

/// Errors raised by persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage key cannot be used as a file name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A failure was injected by a test backend.
    #[error("simulated failure: {0}")]
    Simulated(&'static str),
}

impl From<StorageError> for BoardError {
    fn from(err: StorageError) -> Self {
        BoardError::PersistenceUnavailable(err.to_string())
    }
}
