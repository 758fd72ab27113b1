//! Error types for the platform and the embedded framework

use bramble_bundle::BundleError;
use bramble_core::BrambleError;
use thiserror::Error;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type for embedded framework operations
pub type FrameworkResult<T> = Result<T, FrameworkError>;

/// Errors surfaced by [`Platform`](crate::Platform)
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The platform was used before `initialize` (or after `shutdown`)
    #[error("The platform has not been initialized yet")]
    NotInitialized,

    #[error("Could not find the system bundle")]
    SystemBundleMissing,

    #[error("Bundle not found: {0}")]
    BundleNotFound(String),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error(transparent)]
    Core(#[from] BrambleError),

    #[error("Embedded framework error: {0}")]
    Framework(#[from] FrameworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from an [`EmbeddedFramework`](crate::EmbeddedFramework)
#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("framework is {actual}, expected {expected}")]
    InvalidState { expected: String, actual: String },

    #[error("no plugin named '{0}' in the search path")]
    PluginNotFound(String),

    #[error("unknown plugin id {0}")]
    UnknownPlugin(u64),

    #[error("plugin '{name}' failed: {reason}")]
    PluginFailed { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn PlatformError___not_initialized___displays_message() {
        assert_eq!(
            PlatformError::NotInitialized.to_string(),
            "The platform has not been initialized yet"
        );
    }

    #[test]
    fn PlatformError___from_bundle_error___is_transparent() {
        let err: PlatformError = BundleError::DuplicateBundle("org.example".to_string()).into();

        assert_eq!(err.to_string(), "Bundle already installed: org.example");
    }

    #[test]
    fn PlatformError___from_framework_error___wraps_message() {
        let err: PlatformError = FrameworkError::PluginNotFound("org.x".to_string()).into();

        assert!(err.to_string().contains("no plugin named 'org.x'"));
    }

    #[test]
    fn FrameworkError___invalid_state___names_both_states() {
        let err = FrameworkError::InvalidState {
            expected: "Initialized".to_string(),
            actual: "Created".to_string(),
        };

        assert_eq!(err.to_string(), "framework is Created, expected Initialized");
    }
}
