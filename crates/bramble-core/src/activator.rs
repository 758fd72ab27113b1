//! Bundle activation entry points and their context

use crate::{BrambleError, BrambleResult, ServiceRegistry};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Context handed to a bundle's activator
pub struct BundleContext<'a> {
    symbolic_name: &'a str,
    state_base: &'a Path,
    services: &'a ServiceRegistry,
}

impl<'a> BundleContext<'a> {
    /// Create a new bundle context
    pub fn new(symbolic_name: &'a str, state_base: &'a Path, services: &'a ServiceRegistry) -> Self {
        Self {
            symbolic_name,
            state_base,
            services,
        }
    }

    /// Symbolic name of the bundle being activated
    pub fn symbolic_name(&self) -> &str {
        self.symbolic_name
    }

    /// Platform service registry
    pub fn services(&self) -> &ServiceRegistry {
        self.services
    }

    /// Bundle-scoped state directory, see [`state_path`]
    pub fn state_path(&self, create: bool) -> Option<PathBuf> {
        state_path(self.state_base, self.symbolic_name, create)
    }
}

/// Resolve the state directory `<base>/<symbolic_name>`
///
/// Returns the path when the directory exists, or when `create` is set and
/// creating it succeeded. Returns `None` without touching the filesystem when
/// the directory is missing and `create` is false. Names that are not a
/// single plain path component never resolve, so the result stays under
/// `base`.
pub fn state_path(base: &Path, symbolic_name: &str, create: bool) -> Option<PathBuf> {
    let mut components = Path::new(symbolic_name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name.to_str() == Some(symbolic_name)
    );
    if !plain {
        tracing::warn!(bundle = symbolic_name, "refusing state directory outside the state root");
        return None;
    }
    let path = base.join(symbolic_name);
    if path.is_dir() {
        return Some(path);
    }
    if !create {
        return None;
    }
    match std::fs::create_dir_all(&path) {
        Ok(()) => Some(path),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot create bundle state directory");
            None
        }
    }
}

/// Activation entry points of a bundle
///
/// # Example
///
/// ```ignore
/// use bramble_core::prelude::*;
///
/// struct ViewerActivator;
///
/// impl Activator for ViewerActivator {
///     fn start(&mut self, ctx: &BundleContext<'_>) -> BrambleResult<()> {
///         tracing::info!(bundle = ctx.symbolic_name(), "viewer ready");
///         Ok(())
///     }
///
///     fn stop(&mut self, _ctx: &BundleContext<'_>) -> BrambleResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Activator: Send {
    /// Called on `RESOLVED → ACTIVE`. An error leaves the bundle resolved.
    fn start(&mut self, ctx: &BundleContext<'_>) -> BrambleResult<()>;

    /// Called on `ACTIVE → RESOLVED`. Errors are logged, the bundle still stops.
    fn stop(&mut self, ctx: &BundleContext<'_>) -> BrambleResult<()>;
}

/// Factory producing a fresh activator instance
pub type ActivatorFactory = Arc<dyn Fn() -> Box<dyn Activator> + Send + Sync>;

/// Named activator factories for statically linked bundles
///
/// A manifest's `activator` field is looked up here when the bundle starts.
#[derive(Clone, Default)]
pub struct ActivatorRegistry {
    factories: HashMap<String, ActivatorFactory>,
}

impl ActivatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Activator> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Instantiate the activator registered under `name`
    pub fn create(&self, name: &str) -> BrambleResult<Box<dyn Activator>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| BrambleError::UnknownActivator(name.to_string()))
    }

    /// Check whether a factory is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ActivatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ActivatorRegistry")
            .field("factories", &names)
            .finish()
    }
}
