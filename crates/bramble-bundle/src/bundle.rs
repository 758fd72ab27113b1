//! In-memory representation of an installed bundle.

use crate::BundleManifest;
use bramble_core::{Activator, BrambleError, BrambleResult, BundleState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Handle to a bundle inside the [`BundleLoader`](crate::BundleLoader) that owns it.
///
/// Ids are never reused within one loader, so a handle to an uninstalled
/// bundle keeps pointing at its (terminal) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleId(usize);

impl BundleId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the owning loader's registry.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A discovered bundle: identity, manifest and lifecycle state.
pub struct Bundle {
    id: BundleId,
    location: PathBuf,
    manifest: BundleManifest,
    state: BundleState,
    system: bool,
    cache_entry: Option<PathBuf>,
    pub(crate) activator: Option<Box<dyn Activator>>,
}

impl Bundle {
    pub(crate) fn new(id: BundleId, location: PathBuf, manifest: BundleManifest) -> Self {
        Self {
            id,
            location,
            manifest,
            state: BundleState::Installed,
            system: false,
            cache_entry: None,
            activator: None,
        }
    }

    pub(crate) fn new_system(id: BundleId, location: PathBuf, manifest: BundleManifest) -> Self {
        Self {
            system: true,
            ..Self::new(id, location, manifest)
        }
    }

    #[must_use]
    pub fn id(&self) -> BundleId {
        self.id
    }

    #[must_use]
    pub fn symbolic_name(&self) -> &str {
        self.manifest.symbolic_name()
    }

    #[must_use]
    pub fn version(&self) -> &str {
        self.manifest.version()
    }

    #[must_use]
    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    /// Directory the bundle was loaded from.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[must_use]
    pub fn state(&self) -> BundleState {
        self.state
    }

    /// State as displayed in logs (e.g. `RESOLVED`).
    #[must_use]
    pub fn state_string(&self) -> String {
        self.state.to_string()
    }

    /// Symbolic names of required bundles.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.manifest.requires
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.system
    }

    /// Code cache entry holding this bundle's library, if any.
    #[must_use]
    pub fn cache_entry(&self) -> Option<&Path> {
        self.cache_entry.as_deref()
    }

    pub(crate) fn set_cache_entry(&mut self, entry: PathBuf) {
        self.cache_entry = Some(entry);
    }

    /// Validated transition.
    pub(crate) fn transition_to(&mut self, target: BundleState) -> BrambleResult<()> {
        if self.state.can_transition_to(target) {
            self.state = target;
            Ok(())
        } else {
            Err(BrambleError::InvalidState {
                expected: format!("state that can transition to {target}"),
                actual: self.state.to_string(),
            })
        }
    }

    /// Set state directly (bypassing transition validation).
    ///
    /// Only the system bundle start uses this.
    pub(crate) fn set_state(&mut self, state: BundleState) {
        self.state = state;
    }

    /// Serializable summary of this bundle.
    #[must_use]
    pub fn snapshot(&self) -> BundleSnapshot {
        BundleSnapshot {
            id: self.id,
            symbolic_name: self.symbolic_name().to_string(),
            version: self.version().to_string(),
            state: self.state,
            location: self.location.clone(),
            system: self.system,
        }
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("id", &self.id)
            .field("symbolic_name", &self.symbolic_name())
            .field("version", &self.version())
            .field("state", &self.state)
            .field("location", &self.location)
            .field("system", &self.system)
            .field("has_activator", &self.activator.is_some())
            .finish()
    }
}

/// Detached copy of a bundle's identity and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSnapshot {
    pub id: BundleId,
    pub symbolic_name: String,
    pub version: String,
    pub state: BundleState,
    pub location: PathBuf,
    #[serde(default)]
    pub system: bool,
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn bundle(name: &str) -> Bundle {
        Bundle::new(
            BundleId::new(3),
            PathBuf::from("/plugins").join(name),
            BundleManifest::new(name, "1.0.0"),
        )
    }

    #[test]
    fn Bundle___new___starts_installed() {
        let bundle = bundle("org.example.foo");

        assert_eq!(bundle.state(), BundleState::Installed);
        assert_eq!(bundle.state_string(), "INSTALLED");
        assert!(!bundle.is_system());
    }

    #[test]
    fn Bundle___transition_to___valid_transition_succeeds() {
        let mut bundle = bundle("org.example.foo");

        bundle.transition_to(BundleState::Resolved).unwrap();

        assert_eq!(bundle.state(), BundleState::Resolved);
    }

    #[test]
    fn Bundle___transition_to___invalid_transition_keeps_state() {
        let mut bundle = bundle("org.example.foo");

        let result = bundle.transition_to(BundleState::Active);

        assert!(matches!(result, Err(BrambleError::InvalidState { .. })));
        assert_eq!(bundle.state(), BundleState::Installed);
    }

    #[test]
    fn Bundle___snapshot___copies_identity() {
        let bundle = bundle("org.example.foo");

        let snapshot = bundle.snapshot();

        assert_eq!(snapshot.id, BundleId::new(3));
        assert_eq!(snapshot.symbolic_name, "org.example.foo");
        assert_eq!(snapshot.version, "1.0.0");
        assert_eq!(snapshot.location, PathBuf::from("/plugins/org.example.foo"));
    }

    #[test]
    fn BundleId___display___prefixed_index() {
        assert_eq!(BundleId::new(7).to_string(), "#7");
        assert_eq!(BundleId::new(7).index(), 7);
    }

    #[test]
    fn Bundle___debug___omits_activator_object() {
        let debug = format!("{:?}", bundle("org.example.foo"));

        assert!(debug.contains("has_activator: false"));
    }
}
