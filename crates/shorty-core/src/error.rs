use std::time::Duration;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors reported by a [`Repository`](crate::Repository).
///
/// `AlreadyExists` and `NotFound` are domain outcomes; every other variant is a
/// storage failure (see [`StorageError::is_failure`]).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    AlreadyExists(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage log is corrupt at line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Returns `true` for I/O, serialization and connectivity faults.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::AlreadyExists(_) | Self::NotFound(_))
    }
}

/// Errors surfaced by a [`Shortener`](crate::Shortener).
#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("could not persist short url {code}")]
    Persist {
        code: String,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ShortenerError {
    /// Returns `true` when the underlying cause is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound(_)))
    }
}
