//! Error types for bundle operations.

use bramble_core::BrambleError;
use thiserror::Error;

/// Errors that can occur while loading, resolving or driving bundles.
#[derive(Debug, Error)]
pub enum BundleError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest validation error.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Missing required file in a bundle directory.
    #[error("Missing required file: {0}")]
    MissingFile(String),

    /// Checksum mismatch.
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A bundle with the same symbolic name is already installed.
    #[error("Bundle already installed: {0}")]
    DuplicateBundle(String),

    /// No bundle with the given symbolic name or id.
    #[error("Bundle not found: {0}")]
    BundleNotFound(String),

    /// Bundle is in the wrong lifecycle state for the operation.
    #[error("Bundle state error for '{bundle}': {source}")]
    State {
        bundle: String,
        #[source]
        source: BrambleError,
    },

    /// Code cache root is unusable.
    #[error("Code cache unavailable at {path}: {reason}")]
    CacheUnavailable { path: String, reason: String },
}

impl BundleError {
    /// Wrap a lifecycle error with the bundle it concerns.
    pub fn state(bundle: impl Into<String>, source: BrambleError) -> Self {
        BundleError::State {
            bundle: bundle.into(),
            source,
        }
    }
}
