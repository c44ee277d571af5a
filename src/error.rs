//! Dedup storage error types

use thiserror::Error;

/// Errors produced by the binary codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Stored value has the wrong length
    #[error("input value is {actual} bytes long, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    // ========== Initialization Errors ==========
    /// Database could not be opened or configured
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Exactly one of the two buckets exists
    #[error("inconsistent deduplication storage state: {present:?} exists but {missing:?} is missing")]
    InconsistentState {
        present: &'static str,
        missing: &'static str,
    },

    // ========== Integrity Errors ==========
    /// Size counter key absent from an opened store
    #[error("can't find log size in bucket {0:?}")]
    MissingLogSize(&'static str),

    /// Size counter is already at its maximum and cannot advance
    #[error("log size {0} cannot be advanced")]
    LogSizeOverflow(u64),

    /// Stored value could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] CodecError),

    // ========== Write Errors ==========
    /// A record of an `add` batch failed; earlier records stay committed
    #[error("error writing leaf index {index}: {source}")]
    WriteFailed {
        index: u64,
        #[source]
        source: Box<StorageError>,
    },

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Check if the caller may retry the failed operation
    ///
    /// Only lock contention inside an open store is retriable. Open failures,
    /// corruption and a poisoned handle are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StorageError::Sqlite(e) => is_busy(e),
            StorageError::WriteFailed { source, .. } => source.is_recoverable(),
            StorageError::ConnectionFailed(_)
            | StorageError::Io(_)
            | StorageError::InconsistentState { .. }
            | StorageError::MissingLogSize(_)
            | StorageError::LogSizeOverflow(_)
            | StorageError::Decode(_) => false,
        }
    }

    /// Index of the failed record, for `add` failures
    pub fn failed_index(&self) -> Option<u64> {
        match self {
            StorageError::WriteFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn is_busy(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked)
    )
}

/// Errors produced by the background synchronizer
#[derive(Debug, Error)]
pub enum SyncError {
    /// Dedup store failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authoritative log could not be read
    #[error("log read failed: {0}")]
    LogRead(String),

    /// Log returned fewer leaves than its size promised
    #[error("log returned no leaves at index {index} (target size {target})")]
    ShortRead { index: u64, target: u64 },

    /// Blocking storage task panicked or was cancelled
    #[error("storage task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
