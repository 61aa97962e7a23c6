//! Cache error types.

use std::path::{Path, PathBuf};

use thiserror::Error;
use waymark_router::RouterError;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while warming, loading or clearing the route cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No artifact exists at the cache path.
    #[error("route cache not found at {}", path.display())]
    NotFound {
        /// The cache path.
        path: PathBuf,
    },

    /// Filesystem failure.
    #[error("route cache I/O error at {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact could not be encoded or decoded.
    #[error("route cache JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The artifact was written by an incompatible format version.
    #[error("route cache version {found} is not supported (expected {expected})")]
    IncompatibleVersion {
        /// Version found in the artifact.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },

    /// The stored checksum does not match the stored routes.
    #[error("route cache checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Checksum recorded in the artifact.
        expected: String,
        /// Checksum of the routes actually read.
        actual: String,
    },

    /// The routes could not be restored into a router.
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl CacheError {
    /// Create a not-found error.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if the artifact was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
