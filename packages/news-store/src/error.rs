//! Storage error types.

use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors.
///
/// Each variant carries enough context for the API layer to pick a
/// response status via [`StoreError::http_status`].
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Record not found
    #[error("news record '{0}' not found")]
    NotFound(Uuid),

    /// Underlying storage backend failed
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored row could not be decoded into a record
    #[error("corrupt row for record '{id}': {reason}")]
    CorruptRow { id: Uuid, reason: String },

    /// Store mutex poisoned
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// HTTP status code representing the error.
    pub fn http_status(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Backend(_) | StoreError::CorruptRow { .. } | StoreError::LockPoisoned => {
                500
            }
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}
