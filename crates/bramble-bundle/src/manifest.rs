//! Manifest schema for bundles.
//!
//! The manifest describes the bundle identity, its required bundles, the
//! extension points it declares and the extensions it contributes.

use crate::{BundleError, BundleResult, MANIFEST_FILE, MANIFEST_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Bundle manifest - the main descriptor for a bundle.
///
/// This corresponds to the `manifest.json` file in the bundle directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Manifest format version (e.g., "1.0").
    pub manifest_version: String,

    /// Bundle identity.
    pub bundle: BundleInfo,

    /// Symbolic names of required bundles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,

    /// Extension points declared by this bundle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_points: Vec<ExtensionPointInfo>,

    /// Extensions contributed to other extension points.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionInfo>,

    /// Library artifact copied into the code cache (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryInfo>,
}

/// Bundle identity and activation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleInfo {
    /// Unique symbolic name (e.g., "org.example.viewer").
    pub symbolic_name: String,

    /// Bundle version (e.g., "1.0.0").
    pub version: String,

    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Vendor string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Name of the activator factory to instantiate on start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activator: Option<String>,

    /// When the bundle gets started.
    #[serde(default)]
    pub activation: ActivationPolicy,
}

/// When a resolved bundle is started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Started on first explicit request.
    #[default]
    Lazy,
    /// Started right after the system bundle during launch.
    Eager,
}

/// Extension point declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionPointInfo {
    /// Globally unique extension point id.
    pub id: String,

    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Extension contributed to an extension point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    /// Target extension point id.
    pub point: String,

    /// Optional extension id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free-form attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Library artifact shipped inside the bundle directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryInfo {
    /// Path relative to the bundle directory.
    pub path: String,

    /// SHA256 checksum, `sha256:<hex>`.
    pub checksum: String,
}

impl BundleManifest {
    /// Create a new manifest with minimal required fields.
    #[must_use]
    pub fn new(symbolic_name: &str, version: &str) -> Self {
        Self {
            manifest_version: MANIFEST_VERSION.to_string(),
            bundle: BundleInfo {
                symbolic_name: symbolic_name.to_string(),
                version: version.to_string(),
                name: None,
                vendor: None,
                activator: None,
                activation: ActivationPolicy::Lazy,
            },
            requires: Vec::new(),
            extension_points: Vec::new(),
            extensions: Vec::new(),
            library: None,
        }
    }

    /// Add a required bundle.
    #[must_use]
    pub fn with_requirement(mut self, symbolic_name: &str) -> Self {
        self.requires.push(symbolic_name.to_string());
        self
    }

    /// Set the activator factory name.
    #[must_use]
    pub fn with_activator(mut self, activator: &str) -> Self {
        self.bundle.activator = Some(activator.to_string());
        self
    }

    /// Set the activation policy.
    #[must_use]
    pub fn with_activation(mut self, activation: ActivationPolicy) -> Self {
        self.bundle.activation = activation;
        self
    }

    /// Declare an extension point.
    #[must_use]
    pub fn with_extension_point(mut self, id: &str) -> Self {
        self.extension_points.push(ExtensionPointInfo {
            id: id.to_string(),
            name: None,
        });
        self
    }

    /// Contribute an extension.
    #[must_use]
    pub fn with_extension(mut self, point: &str, id: Option<&str>) -> Self {
        self.extensions.push(ExtensionInfo {
            point: point.to_string(),
            id: id.map(str::to_string),
            attributes: BTreeMap::new(),
        });
        self
    }

    /// Symbolic name shortcut.
    #[must_use]
    pub fn symbolic_name(&self) -> &str {
        &self.bundle.symbolic_name
    }

    /// Version shortcut.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.bundle.version
    }

    /// Validate the manifest.
    pub fn validate(&self) -> BundleResult<()> {
        if self.manifest_version.is_empty() {
            return Err(BundleError::InvalidManifest(
                "manifest_version is required".to_string(),
            ));
        }

        if self.bundle.symbolic_name.trim().is_empty() {
            return Err(BundleError::InvalidManifest(
                "bundle.symbolic_name is required".to_string(),
            ));
        }

        // The name doubles as a directory under the state and cache roots.
        if !is_plain_file_name(&self.bundle.symbolic_name) {
            return Err(BundleError::InvalidManifest(format!(
                "bundle.symbolic_name '{}' must not contain path separators or '..'",
                self.bundle.symbolic_name
            )));
        }

        if self.bundle.version.trim().is_empty() {
            return Err(BundleError::InvalidManifest(
                "bundle.version is required".to_string(),
            ));
        }

        if self
            .requires
            .iter()
            .any(|r| r == &self.bundle.symbolic_name)
        {
            return Err(BundleError::InvalidManifest(format!(
                "bundle {} requires itself",
                self.bundle.symbolic_name
            )));
        }

        if let Some(library) = &self.library {
            if library.path.is_empty() {
                return Err(BundleError::InvalidManifest(
                    "library.path is required".to_string(),
                ));
            }
            if !stays_inside(&library.path) {
                return Err(BundleError::InvalidManifest(format!(
                    "library.path '{}' must stay inside the bundle directory",
                    library.path
                )));
            }
            if !library.checksum.starts_with("sha256:") {
                return Err(BundleError::InvalidManifest(format!(
                    "library.checksum must start with 'sha256:', got '{}'",
                    library.checksum
                )));
            }
        }

        for point in &self.extension_points {
            if point.id.is_empty() {
                return Err(BundleError::InvalidManifest(
                    "extension point id is required".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> BundleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> BundleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and validate `manifest.json` from a bundle directory.
    pub fn read_from_dir(dir: &Path) -> BundleResult<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(BundleError::MissingFile(format!(
                "{MANIFEST_FILE} not found in {}",
                dir.display()
            )));
        }

        let json = std::fs::read_to_string(&manifest_path)?;
        let manifest = Self::from_json(&json)?;
        manifest.validate()?;
        Ok(manifest)
    }
}

/// `name` is exactly one normal path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first.to_str() == Some(name)
    )
}

/// `path` is relative and never steps above its starting directory.
fn stays_inside(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
