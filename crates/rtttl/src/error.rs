//! Error types for the tone library compiler.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, RtttlError>;

/// Errors that abort a compile run.
///
/// Per-file problems are not errors; they are counted as skips.
#[derive(Debug, Error)]
pub enum RtttlError {
    /// The tone source directory does not exist
    #[error("RTTTL directory not found: {}", path.display())]
    SourceDirNotFound {
        /// Configured source directory
        path: PathBuf,
        /// Scanner error, carrying the recovery suggestion
        #[source]
        source: meshtool_core::Error,
    },

    /// Writing the library failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serializing the library failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scanner or configuration error
    #[error(transparent)]
    Core(#[from] meshtool_core::Error),
}

impl RtttlError {
    /// Whether this error means the source directory is absent.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, RtttlError::SourceDirNotFound { .. })
    }
}
