//! Error types for bramble core operations

use thiserror::Error;

/// Result type alias for core operations
pub type BrambleResult<T> = Result<T, BrambleError>;

/// Error type for lifecycle, service and configuration operations
#[derive(Error, Debug)]
pub enum BrambleError {
    /// Bundle is not in a valid state for the requested operation
    #[error("invalid bundle state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Activator start entry point failed
    #[error("activation of bundle '{bundle}' failed: {reason}")]
    ActivationFailed { bundle: String, reason: String },

    /// Activator stop entry point failed
    #[error("deactivation of bundle '{bundle}' failed: {reason}")]
    DeactivationFailed { bundle: String, reason: String },

    /// No activator factory registered under the given name
    #[error("unknown activator: {0}")]
    UnknownActivator(String),

    /// No service registered under the given identifier
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// Service exists but has a different concrete type
    #[error("service '{0}' has an unexpected type")]
    ServiceTypeMismatch(String),

    /// A service is already registered under the identifier
    #[error("service already registered: {0}")]
    DuplicateService(String),

    /// Service still has outstanding references
    #[error("service '{id}' is still referenced by {references} holder(s)")]
    ServiceInUse { id: String, references: usize },

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BrambleError {
    /// Returns a stable numeric code for diagnostics
    pub fn error_code(&self) -> u32 {
        match self {
            BrambleError::InvalidState { .. } => 1,
            BrambleError::ActivationFailed { .. } => 2,
            BrambleError::DeactivationFailed { .. } => 3,
            BrambleError::UnknownActivator(_) => 4,
            BrambleError::ServiceNotFound(_) => 5,
            BrambleError::ServiceTypeMismatch(_) => 6,
            BrambleError::DuplicateService(_) => 7,
            BrambleError::ServiceInUse { .. } => 8,
            BrambleError::ConfigError(_) => 9,
            BrambleError::Internal(_) => 10,
        }
    }

    /// Check if the error came from an activator entry point
    pub fn is_activator_failure(&self) -> bool {
        matches!(
            self,
            BrambleError::ActivationFailed { .. } | BrambleError::DeactivationFailed { .. }
        )
    }
}

impl From<toml::de::Error> for BrambleError {
    fn from(err: toml::de::Error) -> Self {
        BrambleError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
