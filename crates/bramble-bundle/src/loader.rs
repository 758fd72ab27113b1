//! Bundle registry, dependency resolution and lifecycle driver.
//!
//! The [`BundleLoader`] exclusively owns every [`Bundle`] it loads. Other
//! components refer to bundles through [`BundleId`] handles.

use crate::code_cache::verify_sha256;
use crate::{
    Bundle, BundleError, BundleId, BundleManifest, BundleResult, BundleSnapshot, CacheKey,
    CodeCache, EXTENSION_POINT_SERVICE_ID, ExtensionRegistry, SYSTEM_BUNDLE_NAME, SystemBundle,
    compute_sha256,
};
use bramble_core::{
    ActivatorRegistry, BrambleError, BundleContext, BundleState, ServiceRegistry,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a batch load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Bundles installed by this batch.
    pub loaded: Vec<BundleId>,
    /// Candidate paths that failed to load, with the reason.
    pub failed: Vec<(PathBuf, BundleError)>,
}

/// Why a bundle stayed `INSTALLED` after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// A required bundle is not installed.
    MissingDependency(String),
    /// A required bundle is installed but cannot be resolved itself.
    UnresolvedDependency(String),
    /// The bundle is part of a dependency cycle (symbolic names along the cycle).
    Cycle(Vec<String>),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::MissingDependency(name) => {
                write!(f, "required bundle '{name}' is not installed")
            }
            UnresolvedReason::UnresolvedDependency(name) => {
                write!(f, "required bundle '{name}' cannot be resolved")
            }
            UnresolvedReason::Cycle(names) => {
                write!(f, "dependency cycle: {}", names.join(" -> "))
            }
        }
    }
}

/// A bundle left `INSTALLED` by [`BundleLoader::resolve_all_bundles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedBundle {
    pub id: BundleId,
    pub symbolic_name: String,
    pub reason: UnresolvedReason,
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Bundles moved from `INSTALLED` to `RESOLVED` by this pass.
    pub resolved: Vec<BundleId>,
    /// Bundles that stay `INSTALLED`, each reported once.
    pub unresolved: Vec<UnresolvedBundle>,
}

impl ResolutionReport {
    /// Check whether every installed bundle resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

#[derive(Debug, Clone)]
enum Mark {
    Resolvable,
    Unresolvable(UnresolvedReason),
}

/// Working state of the strongly connected component search.
#[derive(Default)]
struct ComponentSearch {
    next_index: usize,
    index: HashMap<BundleId, usize>,
    low_link: HashMap<BundleId, usize>,
    stack: Vec<BundleId>,
    on_stack: HashSet<BundleId>,
    components: Vec<Vec<BundleId>>,
}

/// Loads bundles, resolves their dependencies and drives their lifecycle.
///
/// # Example
///
/// ```no_run
/// use bramble_bundle::{BundleLoader, CodeCache};
/// use bramble_core::ServiceRegistry;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let mut loader = BundleLoader::new(Arc::new(CodeCache::open("/tmp/cache")?));
/// let id = loader.load_bundle(Path::new("/opt/app/plugins/org.example.viewer"))?;
/// loader.resolve_all_bundles();
///
/// let services = ServiceRegistry::new();
/// loader.start_bundle(id, &services)?;
/// # Ok::<(), bramble_bundle::BundleError>(())
/// ```
pub struct BundleLoader {
    code_cache: Arc<CodeCache>,
    activators: ActivatorRegistry,
    state_base: PathBuf,
    bundles: Vec<Bundle>,
    by_name: HashMap<String, BundleId>,
    system: Option<(BundleId, SystemBundle)>,
    start_order: Vec<BundleId>,
}

impl BundleLoader {
    /// Create a loader backed by the given code cache.
    pub fn new(code_cache: Arc<CodeCache>) -> Self {
        Self {
            code_cache,
            activators: ActivatorRegistry::new(),
            state_base: std::env::temp_dir().join(".metadata").join(".plugins"),
            bundles: Vec::new(),
            by_name: HashMap::new(),
            system: None,
            start_order: Vec::new(),
        }
    }

    /// Use these activator factories when starting bundles.
    #[must_use]
    pub fn with_activators(mut self, activators: ActivatorRegistry) -> Self {
        self.activators = activators;
        self
    }

    /// Base directory for bundle state paths handed to activators.
    #[must_use]
    pub fn with_state_base(mut self, state_base: impl Into<PathBuf>) -> Self {
        self.state_base = state_base.into();
        self
    }

    #[must_use]
    pub fn code_cache(&self) -> &CodeCache {
        &self.code_cache
    }

    #[must_use]
    pub fn state_base(&self) -> &Path {
        &self.state_base
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Parse the manifest at `path` and install the bundle in state `INSTALLED`.
    pub fn load_bundle(&mut self, path: &Path) -> BundleResult<BundleId> {
        let manifest = BundleManifest::read_from_dir(path)?;
        let name = manifest.symbolic_name().to_string();

        if name == SYSTEM_BUNDLE_NAME {
            return Err(BundleError::InvalidManifest(format!(
                "symbolic name '{SYSTEM_BUNDLE_NAME}' is reserved"
            )));
        }
        if self.by_name.contains_key(&name) {
            return Err(BundleError::DuplicateBundle(name));
        }

        let id = BundleId::new(self.bundles.len());
        let mut bundle = Bundle::new(id, path.to_path_buf(), manifest);
        if let Some(entry) = self.cache_library(&bundle)? {
            bundle.set_cache_entry(entry);
        }

        tracing::debug!(bundle = %name, id = %id, path = %path.display(), "bundle installed");
        self.bundles.push(bundle);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Load every candidate path, isolating failures.
    ///
    /// A failing candidate is logged and recorded in the report; the
    /// remaining candidates are still loaded.
    pub fn load_bundles(&mut self, paths: &[PathBuf]) -> LoadReport {
        let mut report = LoadReport::default();
        for path in paths {
            match self.load_bundle(path) {
                Ok(id) => {
                    if let Some(bundle) = self.bundle(id) {
                        tracing::info!(
                            path = %path.display(),
                            bundle = bundle.symbolic_name(),
                            state = %bundle.state(),
                            "bundle loaded"
                        );
                    }
                    report.loaded.push(id);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "bundle failed to load, skipped");
                    report.failed.push((path.clone(), e));
                }
            }
        }
        report
    }

    // Copies the manifest's library into the code cache on first load.
    fn cache_library(&self, bundle: &Bundle) -> BundleResult<Option<PathBuf>> {
        let Some(library) = &bundle.manifest().library else {
            return Ok(None);
        };

        let key = CacheKey::new(bundle.symbolic_name(), bundle.version());
        if let Some(entry) = self.code_cache.lookup(&key) {
            if self.code_cache.checksum(&key).as_deref() == Some(library.checksum.as_str()) {
                tracing::debug!(key = %key, "code cache hit");
                return Ok(Some(entry));
            }
            tracing::debug!(key = %key, "stale code cache entry, refreshing");
        }

        let source = bundle.location().join(&library.path);
        if !source.is_file() {
            return Err(BundleError::MissingFile(source.display().to_string()));
        }
        let contents = std::fs::read(&source)?;
        if !verify_sha256(&contents, &library.checksum) {
            return Err(BundleError::ChecksumMismatch {
                path: library.path.clone(),
                expected: library.checksum.clone(),
                actual: format!("sha256:{}", compute_sha256(&contents)),
            });
        }

        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(library.path.as_str());
        self.code_cache.store(&key, file_name, &contents).map(Some)
    }

    /// Install the system bundle.
    pub fn load_system_bundle(&mut self, system: SystemBundle) -> BundleResult<BundleId> {
        if self.system.is_some() {
            return Err(BundleError::DuplicateBundle(SYSTEM_BUNDLE_NAME.to_string()));
        }

        let id = BundleId::new(self.bundles.len());
        let bundle = Bundle::new_system(id, system.storage().to_path_buf(), system.manifest());
        self.bundles.push(bundle);
        self.by_name.insert(SYSTEM_BUNDLE_NAME.to_string(), id);
        self.system = Some((id, system));

        tracing::debug!(id = %id, "system bundle installed");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Find an installed bundle by symbolic name.
    #[must_use]
    pub fn find_bundle(&self, symbolic_name: &str) -> Option<&Bundle> {
        self.by_name
            .get(symbolic_name)
            .and_then(|id| self.bundle(*id))
    }

    /// Look up a bundle by handle (including uninstalled ones).
    #[must_use]
    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles.get(id.index())
    }

    /// All bundles that are not uninstalled, in install order.
    pub fn bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles
            .iter()
            .filter(|b| b.state() != BundleState::Uninstalled)
    }

    /// Number of bundles that are not uninstalled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshots of all bundles that are not uninstalled.
    #[must_use]
    pub fn snapshots(&self) -> Vec<BundleSnapshot> {
        self.bundles().map(Bundle::snapshot).collect()
    }

    #[must_use]
    pub fn system_bundle(&self) -> Option<&SystemBundle> {
        self.system.as_ref().map(|(_, system)| system)
    }

    #[must_use]
    pub fn system_bundle_id(&self) -> Option<BundleId> {
        self.system.as_ref().map(|(id, _)| *id)
    }

    fn live_bundle(&self, id: BundleId) -> BundleResult<&Bundle> {
        self.bundle(id)
            .filter(|b| b.state() != BundleState::Uninstalled)
            .ok_or_else(|| BundleError::BundleNotFound(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve every `INSTALLED` bundle as one batch.
    ///
    /// A bundle becomes `RESOLVED` iff every bundle in its dependency closure
    /// is installed and resolvable. Every bundle on a dependency cycle is
    /// reported with the members of its cycle; bundles depending on an
    /// unresolvable bundle stay `INSTALLED` too. Each unresolved bundle is
    /// reported once and logged; nothing here is fatal.
    pub fn resolve_all_bundles(&mut self) -> ResolutionReport {
        let candidates: Vec<BundleId> = self
            .bundles
            .iter()
            .filter(|b| b.state() == BundleState::Installed)
            .map(Bundle::id)
            .collect();

        let mut marks: HashMap<BundleId, Mark> = self
            .requirement_cycles(&candidates)
            .into_iter()
            .flat_map(|members| {
                let names: Vec<String> = members
                    .iter()
                    .map(|id| self.bundles[id.index()].symbolic_name().to_string())
                    .collect();
                members
                    .into_iter()
                    .map(move |id| (id, Mark::Unresolvable(UnresolvedReason::Cycle(names.clone()))))
            })
            .collect();

        let mut report = ResolutionReport::default();
        for id in &candidates {
            match self.check_resolvable(*id, &mut marks) {
                Ok(()) => report.resolved.push(*id),
                Err(reason) => {
                    let name = self.bundles[id.index()].symbolic_name().to_string();
                    tracing::warn!(bundle = %name, reason = %reason, "bundle left unresolved");
                    report.unresolved.push(UnresolvedBundle {
                        id: *id,
                        symbolic_name: name,
                        reason,
                    });
                }
            }
        }

        for id in &report.resolved {
            let bundle = &mut self.bundles[id.index()];
            if let Err(e) = bundle.transition_to(BundleState::Resolved) {
                tracing::error!(bundle = bundle.symbolic_name(), error = %e, "resolution transition rejected");
            }
        }

        tracing::info!(
            resolved = report.resolved.len(),
            unresolved = report.unresolved.len(),
            "bundle resolution finished"
        );
        report
    }

    /// Installed bundles named in the requirements of `id`.
    fn installed_requirements(&self, id: BundleId) -> Vec<BundleId> {
        self.bundles[id.index()]
            .requires()
            .iter()
            .filter(|required| required.as_str() != SYSTEM_BUNDLE_NAME)
            .filter_map(|required| self.by_name.get(required).copied())
            .filter(|dep| self.bundles[dep.index()].state() == BundleState::Installed)
            .collect()
    }

    /// Requirement cycles among `candidates`, each in install order.
    ///
    /// These are the strongly connected components (Tarjan) with more than
    /// one member; manifests never require themselves.
    fn requirement_cycles(&self, candidates: &[BundleId]) -> Vec<Vec<BundleId>> {
        let mut search = ComponentSearch::default();
        for id in candidates {
            if !search.index.contains_key(id) {
                self.connect(*id, &mut search);
            }
        }

        search
            .components
            .into_iter()
            .filter(|members| members.len() > 1)
            .map(|mut members| {
                members.sort();
                members
            })
            .collect()
    }

    fn connect(&self, id: BundleId, search: &mut ComponentSearch) {
        let index = search.next_index;
        search.next_index += 1;
        search.index.insert(id, index);
        search.low_link.insert(id, index);
        search.stack.push(id);
        search.on_stack.insert(id);

        for dep in self.installed_requirements(id) {
            let reachable = match search.index.get(&dep).copied() {
                None => {
                    self.connect(dep, search);
                    search.low_link[&dep]
                }
                Some(dep_index) if search.on_stack.contains(&dep) => dep_index,
                Some(_) => continue,
            };
            if let Some(low) = search.low_link.get_mut(&id) {
                *low = (*low).min(reachable);
            }
        }

        if search.low_link[&id] == index {
            let mut members = Vec::new();
            while let Some(member) = search.stack.pop() {
                search.on_stack.remove(&member);
                members.push(member);
                if member == id {
                    break;
                }
            }
            search.components.push(members);
        }
    }

    fn check_resolvable(
        &self,
        id: BundleId,
        marks: &mut HashMap<BundleId, Mark>,
    ) -> Result<(), UnresolvedReason> {
        match marks.get(&id) {
            Some(Mark::Resolvable) => return Ok(()),
            Some(Mark::Unresolvable(reason)) => return Err(reason.clone()),
            None => {}
        }

        let bundle = &self.bundles[id.index()];
        if bundle.state().is_resolved() {
            marks.insert(id, Mark::Resolvable);
            return Ok(());
        }

        // Cycle members are marked up front, so this walk only sees a DAG.
        let mut outcome = Ok(());
        for required in bundle.requires() {
            if required == SYSTEM_BUNDLE_NAME {
                continue;
            }
            let Some(dep) = self.by_name.get(required).copied() else {
                outcome = Err(UnresolvedReason::MissingDependency(required.clone()));
                break;
            };
            if self.check_resolvable(dep, marks).is_err() {
                outcome = Err(UnresolvedReason::UnresolvedDependency(required.clone()));
                break;
            }
        }

        let mark = match &outcome {
            Ok(()) => Mark::Resolvable,
            Err(reason) => Mark::Unresolvable(reason.clone()),
        };
        marks.insert(id, mark);
        outcome
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start the system bundle and publish the extension point service.
    ///
    /// The system bundle moves straight from `INSTALLED`/`RESOLVED` to `ACTIVE`.
    pub fn start_system_bundle(&mut self, services: &ServiceRegistry) -> BundleResult<()> {
        let id = self
            .system_bundle_id()
            .ok_or_else(|| BundleError::BundleNotFound(SYSTEM_BUNDLE_NAME.to_string()))?;

        let state = self.bundles[id.index()].state();
        if state.is_active() {
            return Ok(());
        }
        if !matches!(state, BundleState::Installed | BundleState::Resolved) {
            return Err(BundleError::state(
                SYSTEM_BUNDLE_NAME,
                BrambleError::InvalidState {
                    expected: "INSTALLED or RESOLVED".to_string(),
                    actual: state.to_string(),
                },
            ));
        }

        let registry = ExtensionRegistry::from_manifests(
            self.bundles
                .iter()
                .filter(|b| b.is_system() || b.state().is_resolved())
                .map(Bundle::manifest),
        );
        match services.register(EXTENSION_POINT_SERVICE_ID, Arc::new(registry)) {
            Ok(()) => {}
            Err(BrambleError::DuplicateService(_)) => {
                tracing::debug!("extension point service already registered");
            }
            Err(e) => return Err(BundleError::state(SYSTEM_BUNDLE_NAME, e)),
        }

        self.bundles[id.index()].set_state(BundleState::Active);
        self.start_order.push(id);
        tracing::info!("system bundle started");
        Ok(())
    }

    /// Mark the platform operational once every framework has started.
    pub fn resume_system_bundle(&mut self) -> BundleResult<()> {
        let Some((id, system)) = self.system.as_mut() else {
            return Err(BundleError::BundleNotFound(SYSTEM_BUNDLE_NAME.to_string()));
        };

        let state = self.bundles[id.index()].state();
        if !state.is_active() {
            return Err(BundleError::state(
                SYSTEM_BUNDLE_NAME,
                BrambleError::InvalidState {
                    expected: BundleState::Active.to_string(),
                    actual: state.to_string(),
                },
            ));
        }

        system.resume();
        tracing::info!("platform is operational");
        Ok(())
    }

    /// Start a resolved bundle, starting its required bundles first.
    ///
    /// On activation failure the bundle stays `RESOLVED` and the error is returned.
    pub fn start_bundle(&mut self, id: BundleId, services: &ServiceRegistry) -> BundleResult<()> {
        let bundle = self.live_bundle(id)?;
        let name = bundle.symbolic_name().to_string();

        match bundle.state() {
            BundleState::Active => return Ok(()),
            BundleState::Resolved => {}
            other => {
                return Err(BundleError::state(
                    name,
                    BrambleError::InvalidState {
                        expected: BundleState::Resolved.to_string(),
                        actual: other.to_string(),
                    },
                ));
            }
        }

        if bundle.is_system() {
            return self.start_system_bundle(services);
        }

        let requires = bundle.requires().to_vec();
        let activator_name = bundle.manifest().bundle.activator.clone();

        // A requirement found in STARTING closes a cycle back to this bundle.
        self.transition(id, BundleState::Starting)?;

        for required in &requires {
            let Some(dep) = self.by_name.get(required).copied() else {
                continue;
            };
            let reason = match self.bundles[dep.index()].state() {
                BundleState::Starting => Some(format!(
                    "required bundle '{required}' is already starting (dependency cycle)"
                )),
                _ => self
                    .start_bundle(dep, services)
                    .err()
                    .map(|e| format!("required bundle '{required}' failed to start: {e}")),
            };
            if let Some(reason) = reason {
                self.transition(id, BundleState::Resolved)?;
                tracing::warn!(bundle = %name, reason = %reason, "bundle activation failed");
                return Err(BundleError::state(
                    &name,
                    BrambleError::ActivationFailed {
                        bundle: name.clone(),
                        reason,
                    },
                ));
            }
        }

        let mut activator = match activator_name.as_deref().map(|a| self.activators.create(a)) {
            None => None,
            Some(Ok(activator)) => Some(activator),
            Some(Err(e)) => {
                self.transition(id, BundleState::Resolved)?;
                tracing::warn!(bundle = %name, error = %e, "bundle activation failed");
                return Err(BundleError::state(name, e));
            }
        };

        if let Some(activator) = activator.as_mut() {
            let ctx = BundleContext::new(&name, &self.state_base, services);
            if let Err(e) = activator.start(&ctx) {
                self.transition(id, BundleState::Resolved)?;
                tracing::warn!(bundle = %name, error = %e, "bundle activation failed");
                let source = match e {
                    e @ BrambleError::ActivationFailed { .. } => e,
                    other => BrambleError::ActivationFailed {
                        bundle: name.clone(),
                        reason: other.to_string(),
                    },
                };
                return Err(BundleError::state(name, source));
            }
        }

        self.bundles[id.index()].activator = activator;
        self.transition(id, BundleState::Active)?;
        self.start_order.push(id);
        tracing::info!(bundle = %name, "bundle started");
        Ok(())
    }

    /// Start every resolved bundle whose activation policy is eager.
    ///
    /// Failures are logged and returned; they do not stop the remaining bundles.
    pub fn start_eager_bundles(
        &mut self,
        services: &ServiceRegistry,
    ) -> Vec<(BundleId, BundleError)> {
        let eager: Vec<BundleId> = self
            .bundles()
            .filter(|b| {
                b.state() == BundleState::Resolved
                    && b.manifest().bundle.activation == crate::ActivationPolicy::Eager
            })
            .map(Bundle::id)
            .collect();

        let mut failures = Vec::new();
        for id in eager {
            if let Err(e) = self.start_bundle(id, services) {
                failures.push((id, e));
            }
        }
        failures
    }

    /// Stop an active bundle. Deactivation errors are logged; the bundle
    /// always ends up `RESOLVED`. Stopping a bundle that is not active is a no-op.
    pub fn stop_bundle(&mut self, id: BundleId, services: &ServiceRegistry) -> BundleResult<()> {
        let bundle = self.live_bundle(id)?;
        if !bundle.state().is_active() {
            return Ok(());
        }
        let name = bundle.symbolic_name().to_string();
        let system = bundle.is_system();

        self.transition(id, BundleState::Stopping)?;

        if let Some(mut activator) = self.bundles[id.index()].activator.take() {
            let ctx = BundleContext::new(&name, &self.state_base, services);
            if let Err(e) = activator.stop(&ctx) {
                tracing::warn!(bundle = %name, error = %e, "bundle deactivation failed, stopping anyway");
            }
        }

        if system {
            if let Err(e) = services.unregister(EXTENSION_POINT_SERVICE_ID) {
                tracing::warn!(error = %e, "extension point service left registered");
            }
        }

        self.transition(id, BundleState::Resolved)?;
        self.start_order.retain(|started| *started != id);
        tracing::info!(bundle = %name, "bundle stopped");
        Ok(())
    }

    /// Stop every active bundle in reverse start order.
    pub fn stop_all(&mut self, services: &ServiceRegistry) {
        let order: Vec<BundleId> = self.start_order.iter().rev().copied().collect();
        for id in order {
            if let Err(e) = self.stop_bundle(id, services) {
                tracing::warn!(id = %id, error = %e, "bundle stop failed");
            }
        }
    }

    /// Remove a bundle from the platform. `UNINSTALLED` is terminal.
    pub fn uninstall_bundle(&mut self, id: BundleId, services: &ServiceRegistry) -> BundleResult<()> {
        let bundle = self.live_bundle(id)?;
        let name = bundle.symbolic_name().to_string();
        if bundle.is_system() {
            return Err(BundleError::state(
                name,
                BrambleError::InvalidState {
                    expected: "regular bundle".to_string(),
                    actual: "system bundle".to_string(),
                },
            ));
        }

        self.stop_bundle(id, services)?;
        self.transition(id, BundleState::Uninstalled)?;
        self.by_name.remove(&name);
        tracing::info!(bundle = %name, "bundle uninstalled");
        Ok(())
    }

    fn transition(&mut self, id: BundleId, target: BundleState) -> BundleResult<()> {
        let bundle = &mut self.bundles[id.index()];
        bundle
            .transition_to(target)
            .map_err(|e| BundleError::state(bundle.symbolic_name(), e))
    }
}

impl fmt::Debug for BundleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleLoader")
            .field("code_cache", &self.code_cache.root())
            .field("bundles", &self.bundles)
            .field("system", &self.system_bundle_id())
            .finish()
    }
}


#[cfg(test)]
#[path = "loader/resolution_tests.rs"]
mod resolution_tests;
