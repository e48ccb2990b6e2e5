//! Board error types.
//!
//! `NotFound` is a caller contract violation and comes back as `Err`.
//! The two persistence variants never fail a mutation: the in-memory
//! collection keeps working and the error is handed back as a warning
//! through [`Reported`].

use thiserror::Error;

use crate::model::TeacherId;

/// Errors that can occur while operating on the teacher board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The referenced teacher is not in the collection.
    #[error("teacher not found: {0}")]
    NotFound(TeacherId),

    /// The backing store could not be read or written.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Persisted data failed to parse or validate.
    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),
}

/// Result type for board operations.
pub type BoardResult<T> = std::result::Result<T, BoardError>;

/// A value produced by an operation that may carry a non-fatal warning.
#[derive(Debug, Clone)]
#[must_use = "a persistence warning may be attached"]
pub struct Reported<T> {
    /// The operation's result.
    pub value: T,
    /// Set when persistence failed or persisted state had to be discarded.
    pub warning: Option<BoardError>,
}

impl<T> Reported<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub fn with_warning(value: T, warning: Option<BoardError>) -> Self {
        Self { value, warning }
    }

    /// Split into the value and the optional warning.
    pub fn into_parts(self) -> (T, Option<BoardError>) {
        (self.value, self.warning)
    }
}
