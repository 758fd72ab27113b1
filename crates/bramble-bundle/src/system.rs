//! The system bundle representing the platform itself.

use crate::BundleManifest;
use std::path::{Path, PathBuf};

/// Reserved symbolic name of the system bundle.
pub const SYSTEM_BUNDLE_NAME: &str = "system.bundle";

/// Platform bundle state: storage location and the operational flag.
///
/// The system bundle has no requirements. Other bundles may require
/// [`SYSTEM_BUNDLE_NAME`]; that requirement is always satisfied.
#[derive(Debug, Clone)]
pub struct SystemBundle {
    storage: PathBuf,
    operational: bool,
}

impl SystemBundle {
    /// Create the system bundle with its persistent storage directory.
    pub fn new(storage: impl Into<PathBuf>) -> Self {
        Self {
            storage: storage.into(),
            operational: false,
        }
    }

    /// Storage directory for the platform's own persisted state.
    #[must_use]
    pub fn storage(&self) -> &Path {
        &self.storage
    }

    /// Manifest describing the system bundle.
    #[must_use]
    pub fn manifest(&self) -> BundleManifest {
        let mut manifest = BundleManifest::new(SYSTEM_BUNDLE_NAME, env!("CARGO_PKG_VERSION"));
        manifest.bundle.name = Some("Platform".to_string());
        manifest
    }

    /// Whether [`resume`](Self::resume) has run.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.operational
    }

    pub(crate) fn resume(&mut self) {
        self.operational = true;
    }
}
