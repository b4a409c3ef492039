//! Error types for document persistence.

use std::path::PathBuf;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures while reading or writing the data file.
///
/// None of these are fatal: the store logs them and keeps serving its
/// in-memory document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The data file or its directory could not be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The data file exists but does not hold a valid document.
    #[error("malformed document in {}: {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("cannot serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
