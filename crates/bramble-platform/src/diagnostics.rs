//! Debug state saved at shutdown and read back at the next start

use crate::error::PlatformResult;
use bramble_bundle::BundleSnapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// File name of the snapshot inside `<user>/.metadata`
pub const STATE_FILE: &str = "platform-state.json";

/// Bundle states at the time the platform shut down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStateSnapshot {
    pub application: String,
    /// Seconds since the Unix epoch
    pub saved_at: u64,
    pub bundles: Vec<BundleSnapshot>,
}

impl PlatformStateSnapshot {
    pub fn new(application: impl Into<String>, bundles: Vec<BundleSnapshot>) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            application: application.into(),
            saved_at,
            bundles,
        }
    }

    /// Write the snapshot as pretty JSON, creating the parent directory
    pub fn save(&self, path: &Path) -> PlatformResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Read a snapshot; `None` when the file does not exist
    pub fn load(path: &Path) -> PlatformResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn PlatformStateSnapshot___save_then_load___same_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".metadata").join(STATE_FILE);
        let snapshot = PlatformStateSnapshot::new("viewer", Vec::new());

        snapshot.save(&path).unwrap();
        let loaded = PlatformStateSnapshot::load(&path).unwrap();

        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn PlatformStateSnapshot___load___missing_file_is_none() {
        let temp = TempDir::new().unwrap();

        let loaded = PlatformStateSnapshot::load(&temp.path().join(STATE_FILE)).unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn PlatformStateSnapshot___load___corrupt_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(STATE_FILE);
        std::fs::write(&path, "{ nope").unwrap();

        assert!(PlatformStateSnapshot::load(&path).is_err());
    }
}
