//! Durable storage errors.

use std::path::PathBuf;

/// Error returned when a [`FileStorage`](crate::FileStorage) cannot be opened.
///
/// Writes after opening never error; they are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error reading the storage file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Storage file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Storage file is not a JSON object of strings.
    #[error("Corrupt storage file {}: {source}", .path.display())]
    Json {
        /// Storage file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
