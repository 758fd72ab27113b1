//! Extension point service published by the system bundle.

use crate::BundleManifest;
use std::collections::BTreeMap;

/// Service id under which the system bundle registers the [`ExtensionRegistry`].
pub const EXTENSION_POINT_SERVICE_ID: &str = "org.bramble.core.extensionpoint";

/// Declared extension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPoint {
    pub id: String,
    pub name: Option<String>,
    /// Symbolic name of the declaring bundle.
    pub contributor: String,
}

/// Extension contributed to an extension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub point: String,
    pub id: Option<String>,
    /// Symbolic name of the contributing bundle.
    pub contributor: String,
    pub attributes: BTreeMap<String, String>,
}

/// Query interface over declared extension points and their extensions.
pub trait ExtensionPointService: Send + Sync {
    /// Look up an extension point by id.
    fn extension_point(&self, id: &str) -> Option<ExtensionPoint>;

    /// All extension points, sorted by id.
    fn extension_points(&self) -> Vec<ExtensionPoint>;

    /// Extensions contributed to `point_id`, in contribution order.
    fn extensions(&self, point_id: &str) -> Vec<Extension>;

    fn has_extension_point(&self, id: &str) -> bool {
        self.extension_point(id).is_some()
    }
}

/// In-memory [`ExtensionPointService`] built from bundle manifests.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    points: BTreeMap<String, ExtensionPoint>,
    extensions: BTreeMap<String, Vec<Extension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a set of manifests.
    ///
    /// All extension points are collected first so contribution order does
    /// not depend on bundle order. Extensions naming an undeclared point are
    /// dropped with a warning; duplicate point ids keep the first declaration.
    pub fn from_manifests<'a, I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = &'a BundleManifest>,
    {
        let manifests: Vec<&BundleManifest> = manifests.into_iter().collect();
        let mut registry = Self::new();

        for manifest in &manifests {
            for point in &manifest.extension_points {
                if registry.points.contains_key(&point.id) {
                    tracing::warn!(
                        point = %point.id,
                        bundle = manifest.symbolic_name(),
                        "duplicate extension point ignored"
                    );
                    continue;
                }
                registry.points.insert(
                    point.id.clone(),
                    ExtensionPoint {
                        id: point.id.clone(),
                        name: point.name.clone(),
                        contributor: manifest.symbolic_name().to_string(),
                    },
                );
            }
        }

        for manifest in &manifests {
            for extension in &manifest.extensions {
                if !registry.points.contains_key(&extension.point) {
                    tracing::warn!(
                        point = %extension.point,
                        bundle = manifest.symbolic_name(),
                        "extension targets an undeclared extension point, ignored"
                    );
                    continue;
                }
                registry
                    .extensions
                    .entry(extension.point.clone())
                    .or_default()
                    .push(Extension {
                        point: extension.point.clone(),
                        id: extension.id.clone(),
                        contributor: manifest.symbolic_name().to_string(),
                        attributes: extension.attributes.clone(),
                    });
            }
        }

        registry
    }
}

impl ExtensionPointService for ExtensionRegistry {
    fn extension_point(&self, id: &str) -> Option<ExtensionPoint> {
        self.points.get(id).cloned()
    }

    fn extension_points(&self) -> Vec<ExtensionPoint> {
        self.points.values().cloned().collect()
    }

    fn extensions(&self, point_id: &str) -> Vec<Extension> {
        self.extensions.get(point_id).cloned().unwrap_or_default()
    }
}
