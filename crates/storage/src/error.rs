//! Error types for the record store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create store directory '{path}'")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read record store '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write record store '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock record store '{path}'")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold a JSON array of records.
    ///
    /// Backends recover from this by treating the store as empty; it is only
    /// returned by [`parse_entries`](crate::backends::filesystem::parse_entries).
    #[error("Record store '{path}' does not contain a record list")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize records")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage task failed")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Result type alias for record store operations.
pub type Result<T> = std::result::Result<T, StorageError>;
