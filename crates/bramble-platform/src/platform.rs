//! The platform orchestrator

use crate::application::{
    Application, ApplicationContext, ApplicationRegistry, EXIT_OK, EXIT_SOFTWARE,
};
use crate::diagnostics::{PlatformStateSnapshot, STATE_FILE};
use crate::error::{PlatformError, PlatformResult};
use crate::framework::{EmbeddedFramework, EmbeddedPlugin, LocalFramework, PluginId};
use crate::keys;
use crate::options::PlatformArgs;
use crate::paths::{PlatformEnvironment, PlatformPaths};
use bramble_bundle::{
    Bundle, BundleLoader, BundleSnapshot, CodeCache, EXTENSION_POINT_SERVICE_ID,
    ExtensionPointService, ExtensionRegistry, SystemBundle, discover_bundle_paths,
};
use bramble_core::{
    Activator, ActivatorRegistry, ConfigLayer, LayeredConfig, LogLevel, ServiceRegistry, priority,
};
use bramble_logging::{LogSink, LoggingConfig, ReloadHandle};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Global platform instance
static PLATFORM: OnceCell<Platform> = OnceCell::new();

type FrameworkFactory = Box<dyn Fn() -> Box<dyn EmbeddedFramework> + Send + Sync>;

/// Result of [`Platform::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    /// `initialize` had already run; nothing was rebuilt
    AlreadyInitialized,
    /// `--help` was given; the caller prints the text and exits with `EXIT_OK`
    HelpRequested(String),
}

/// Process-wide orchestrator of bundles, services and the embedded framework.
///
/// One coarse lock guards initialization, shutdown, the running flag and
/// every accessor. The launched application runs outside the lock, so it may
/// call back into the platform. Bundle activators run while the lock is held
/// and must work through their `BundleContext` instead.
pub struct Platform {
    environment: PlatformEnvironment,
    state: Mutex<PlatformState>,
    activators: Mutex<ActivatorRegistry>,
    applications: Mutex<ApplicationRegistry>,
    framework_factory: FrameworkFactory,
}

#[derive(Default)]
struct PlatformState {
    initialized: bool,
    running: bool,
    runtime: Option<Runtime>,
}

impl PlatformState {
    fn runtime(&self) -> PlatformResult<&Runtime> {
        if !self.initialized {
            return Err(PlatformError::NotInitialized);
        }
        self.runtime.as_ref().ok_or(PlatformError::NotInitialized)
    }

    fn runtime_mut(&mut self) -> PlatformResult<&mut Runtime> {
        if !self.initialized {
            return Err(PlatformError::NotInitialized);
        }
        self.runtime.as_mut().ok_or(PlatformError::NotInitialized)
    }
}

/// Everything built by one `initialize`, torn down by `shutdown`
struct Runtime {
    app_name: String,
    config: LayeredConfig,
    paths: PlatformPaths,
    services: Arc<ServiceRegistry>,
    code_cache: Arc<CodeCache>,
    loader: BundleLoader,
    framework: Box<dyn EmbeddedFramework>,
    installed_plugins: Vec<PluginId>,
    application_args: Vec<String>,
}

impl Platform {
    /// Create a platform using the in-process embedded framework
    pub fn new(environment: PlatformEnvironment) -> Self {
        Self {
            environment,
            state: Mutex::new(PlatformState::default()),
            activators: Mutex::new(ActivatorRegistry::new()),
            applications: Mutex::new(ApplicationRegistry::new()),
            framework_factory: Box::new(|| Box::new(LocalFramework::new()) as Box<dyn EmbeddedFramework>),
        }
    }

    /// Use a different embedded framework implementation
    pub fn with_framework<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn EmbeddedFramework> + Send + Sync + 'static,
    {
        self.framework_factory = Box::new(factory);
        self
    }

    /// Get the global platform, built from the process environment on first access
    pub fn global() -> &'static Platform {
        PLATFORM.get_or_init(|| Platform::new(PlatformEnvironment::from_process()))
    }

    pub fn environment(&self) -> &PlatformEnvironment {
        &self.environment
    }

    /// Register a bundle activator factory. Takes effect at the next `initialize`.
    pub fn register_activator<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Activator> + Send + Sync + 'static,
    {
        self.activators.lock().register(name, factory);
    }

    /// Register an application that `launch` can run
    pub fn register_application<A>(&self, id: impl Into<String>, application: A)
    where
        A: Application + 'static,
    {
        self.applications.lock().register(id, application);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Bring the platform up.
    ///
    /// Parses `args` (argv[0] first), layers configuration, resolves the
    /// platform paths, opens the log file and code cache, initializes the
    /// embedded framework, optionally cleans the code cache, then loads and
    /// resolves every bundle found in the plugin directories. Individual
    /// bundle failures are logged and do not fail initialization.
    ///
    /// Calling it again before `shutdown` is a no-op.
    pub fn initialize<S: AsRef<str>>(
        &self,
        args: &[S],
        overlay: Option<ConfigLayer>,
    ) -> PlatformResult<InitOutcome> {
        let mut state = self.state.lock();
        if state.initialized {
            tracing::debug!("platform already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let options = PlatformArgs::parse_lenient(args);
        if options.args.help {
            return Ok(InitOutcome::HelpRequested(PlatformArgs::help_text(
                &self.environment.app_name,
            )));
        }

        let config = self.load_configuration(&options.args, overlay);
        let services = Arc::new(ServiceRegistry::new());
        let console_log = config.flag(keys::CONSOLELOG);
        let paths = PlatformPaths::resolve(&config, &self.environment);
        self.init_logging(&config, &paths, console_log);
        for ignored in &options.ignored {
            tracing::warn!(option = %ignored, "unknown command-line option ignored");
        }

        let code_cache = Arc::new(CodeCache::open_or_default(
            config.get_path(keys::PLUGIN_CACHE),
            paths.default_code_cache(),
        ));
        let mut loader = BundleLoader::new(Arc::clone(&code_cache))
            .with_activators(self.activators.lock().clone())
            .with_state_base(paths.base_state());

        let (framework, installed_plugins) = self.init_framework(&paths)?;

        if config.flag(keys::CLEAN) {
            match code_cache.clear() {
                Ok(removed) => tracing::info!(entries = removed, "code cache cleaned"),
                Err(e) => tracing::warn!(error = %e, "code cache not cleaned"),
            }
        }

        let plugin_dirs = config
            .get_string(keys::PLUGIN_DIRS)
            .unwrap_or_else(|| paths.default_plugin_dir().display().to_string());
        let candidates = discover_bundle_paths(&plugin_dirs);
        let loaded = loader.load_bundles(&candidates);
        let resolution = loader.resolve_all_bundles();
        tracing::info!(
            candidates = candidates.len(),
            loaded = loaded.loaded.len(),
            failed = loaded.failed.len(),
            unresolved = resolution.unresolved.len(),
            "bundles loaded"
        );

        restore_state(&paths);

        let mut application_args = vec![config.get_string_or(keys::ARGV0, &self.environment.argv0)];
        application_args.extend(options.args.args.iter().cloned());

        state.runtime = Some(Runtime {
            app_name: self.environment.app_name.clone(),
            config,
            paths,
            services,
            code_cache,
            loader,
            framework,
            installed_plugins,
            application_args,
        });
        state.initialized = true;
        state.running = false;

        tracing::info!(app = %self.environment.app_name, "platform initialized");
        Ok(InitOutcome::Initialized)
    }

    /// Start the system bundle and run the configured application.
    ///
    /// Returns the application's exit code. A second call while running is
    /// a no-op returning `EXIT_OK`.
    pub fn launch(&self) -> PlatformResult<i32> {
        let request = {
            let mut state = self.state.lock();
            if !state.initialized {
                return Err(PlatformError::NotInitialized);
            }
            if state.running {
                tracing::debug!("platform already running");
                return Ok(EXIT_OK);
            }

            state.running = true;
            let started = state.runtime_mut().and_then(Runtime::start);
            if let Err(e) = started {
                state.running = false;
                return Err(e);
            }
            state.runtime()?.application_request()
        };

        Ok(self.run_application(request))
    }

    /// Save diagnostic state and tear everything down.
    ///
    /// Active bundles are stopped in reverse start order, then the service
    /// registry, bundle loader and code cache are released in that order.
    pub fn shutdown(&self) -> PlatformResult<()> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(PlatformError::NotInitialized);
        }
        let runtime = state.runtime.take().ok_or(PlatformError::NotInitialized)?;

        runtime.save_state();
        state.initialized = false;
        state.running = false;

        let log_file = runtime.paths.log_file(&runtime.app_name);
        runtime.teardown();
        tracing::info!("platform shut down");

        if LogSink::global().path().as_deref() == Some(log_file.as_path()) {
            LogSink::global().close();
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    pub fn is_running(&self) -> bool {
        let state = self.state.lock();
        state.initialized && state.running
    }

    /// Change the platform log level at runtime
    pub fn set_log_level(&self, level: LogLevel) {
        LogSink::global().set_level(level);
        match ReloadHandle::global().set_level(level) {
            Ok(true) => {}
            Ok(false) => tracing::debug!(level = %level, "no level filter installed, level deferred"),
            Err(e) => tracing::warn!(error = %e, "level filter not reloaded"),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    fn with_runtime<T>(&self, f: impl FnOnce(&Runtime) -> T) -> PlatformResult<T> {
        let state = self.state.lock();
        state.runtime().map(f)
    }

    fn with_runtime_mut<T>(
        &self,
        f: impl FnOnce(&mut Runtime) -> PlatformResult<T>,
    ) -> PlatformResult<T> {
        let mut state = self.state.lock();
        f(state.runtime_mut()?)
    }

    /// Snapshot of the bundle with the given symbolic name
    pub fn get_bundle(&self, symbolic_name: &str) -> PlatformResult<Option<BundleSnapshot>> {
        self.with_runtime(|rt| rt.loader.find_bundle(symbolic_name).map(Bundle::snapshot))
    }

    /// Snapshots of all installed bundles
    pub fn bundles(&self) -> PlatformResult<Vec<BundleSnapshot>> {
        self.with_runtime(|rt| rt.loader.snapshots())
    }

    pub fn start_bundle(&self, symbolic_name: &str) -> PlatformResult<()> {
        self.with_runtime_mut(|rt| {
            let id = rt.bundle_id(symbolic_name)?;
            rt.loader.start_bundle(id, &rt.services)?;
            Ok(())
        })
    }

    pub fn stop_bundle(&self, symbolic_name: &str) -> PlatformResult<()> {
        self.with_runtime_mut(|rt| {
            let id = rt.bundle_id(symbolic_name)?;
            rt.loader.stop_bundle(id, &rt.services)?;
            Ok(())
        })
    }

    pub fn uninstall_bundle(&self, symbolic_name: &str) -> PlatformResult<()> {
        self.with_runtime_mut(|rt| {
            let id = rt.bundle_id(symbolic_name)?;
            rt.loader.uninstall_bundle(id, &rt.services)?;
            Ok(())
        })
    }

    pub fn service_registry(&self) -> PlatformResult<Arc<ServiceRegistry>> {
        self.with_runtime(|rt| Arc::clone(&rt.services))
    }

    /// The extension point service; present once the platform is launched
    pub fn extension_point_service(
        &self,
    ) -> PlatformResult<Option<Arc<dyn ExtensionPointService>>> {
        self.with_runtime(|rt| {
            rt.services
                .get_service_by_id::<ExtensionRegistry>(EXTENSION_POINT_SERVICE_ID)
                .map(|registry| registry as Arc<dyn ExtensionPointService>)
        })
    }

    pub fn configuration_path(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.paths.configuration().to_path_buf())
    }

    pub fn install_path(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.paths.install().to_path_buf())
    }

    pub fn instance_path(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.paths.instance().to_path_buf())
    }

    pub fn user_path(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.paths.user().to_path_buf())
    }

    pub fn log_file(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.paths.log_file(&rt.app_name))
    }

    pub fn code_cache_root(&self) -> PlatformResult<PathBuf> {
        self.with_runtime(|rt| rt.code_cache.root().to_path_buf())
    }

    /// State directory of a bundle: `<user>/.metadata/.plugins/<name>`.
    ///
    /// With `create` the directory is created; without it a missing
    /// directory yields `None`.
    pub fn state_path(&self, symbolic_name: &str, create: bool) -> PlatformResult<Option<PathBuf>> {
        self.with_runtime(|rt| rt.paths.state_path(symbolic_name, create))
    }

    /// Application arguments with argv[0] first
    pub fn application_args(&self) -> PlatformResult<Vec<String>> {
        self.with_runtime(|rt| rt.application_args.clone())
    }

    /// Effective value of a configuration key
    pub fn config_string(&self, key: &str) -> PlatformResult<Option<String>> {
        self.with_runtime(|rt| rt.config.get_string(key))
    }

    pub fn has_property(&self, key: &str) -> PlatformResult<bool> {
        self.with_runtime(|rt| rt.config.has_property(key))
    }

    /// Plugins installed in the embedded framework
    pub fn embedded_plugins(&self) -> PlatformResult<Vec<EmbeddedPlugin>> {
        self.with_runtime(|rt| {
            rt.installed_plugins
                .iter()
                .filter_map(|id| rt.framework.plugin(*id))
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Initialization steps
    // ------------------------------------------------------------------

    fn load_configuration(&self, args: &PlatformArgs, overlay: Option<ConfigLayer>) -> LayeredConfig {
        let mut config = LayeredConfig::new();
        config.add(self.environment.defaults_layer(), priority::DEFAULTS);
        config.add(args.to_config_layer(), priority::COMMAND_LINE);
        if let Some(overlay) = overlay {
            config.add(overlay, priority::OVERLAY);
        }

        let config_dir = config
            .get_path(keys::CONFIG_DIR)
            .unwrap_or_else(|| self.environment.config_dir.clone());
        let file = config_dir.join(format!("{}.toml", self.environment.app_name));
        match ConfigLayer::from_toml_file(&file) {
            Ok(Some(layer)) => config.add(layer, priority::FILE),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "configuration file ignored");
            }
        }
        config
    }

    fn init_logging(&self, config: &LayeredConfig, paths: &PlatformPaths, console_log: bool) {
        let level = match config.get_string(keys::LOG_LEVEL) {
            Some(value) => LogLevel::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown log level, using INFO");
                LogLevel::Info
            }),
            None => LogLevel::Info,
        };
        let logging = LoggingConfig::default()
            .with_log_file(paths.log_file(&self.environment.app_name))
            .with_console(console_log)
            .with_level(level);

        if let Err(e) = bramble_logging::init_logging(&logging) {
            tracing::warn!(error = %e, "platform log file not opened");
        }
    }

    fn init_framework(
        &self,
        paths: &PlatformPaths,
    ) -> PlatformResult<(Box<dyn EmbeddedFramework>, Vec<PluginId>)> {
        let mut framework = (self.framework_factory)();
        framework.init(paths.user())?;

        let plugin_dir = paths.default_plugin_dir();
        framework.add_search_path(&plugin_dir);

        let mut installed = Vec::new();
        for name in framework.plugin_symbolic_names(&plugin_dir) {
            match framework.install(&name) {
                Ok(id) => installed.push(id),
                Err(e) => tracing::warn!(plugin = %name, error = %e, "embedded plugin not installed"),
            }
        }
        Ok((framework, installed))
    }

    fn run_application(&self, request: Option<ApplicationContext>) -> i32 {
        let Some(ctx) = request else {
            tracing::info!("no application configured");
            return EXIT_OK;
        };
        let Some(application) = self.applications.lock().get(ctx.application_id()) else {
            tracing::error!(application = ctx.application_id(), "application not found");
            return EXIT_SOFTWARE;
        };

        tracing::info!(application = ctx.application_id(), "running application");
        let code = application.run(&ctx);
        tracing::info!(application = ctx.application_id(), exit_code = code, "application finished");
        code
    }
}

impl Runtime {
    fn bundle_id(&self, symbolic_name: &str) -> PlatformResult<bramble_bundle::BundleId> {
        self.loader
            .find_bundle(symbolic_name)
            .map(Bundle::id)
            .ok_or_else(|| PlatformError::BundleNotFound(symbolic_name.to_string()))
    }

    /// Install and start the system bundle, start the embedded framework
    /// with its plugins and the eager bundles, then resume.
    fn start(&mut self) -> PlatformResult<()> {
        // A failed earlier launch may already have installed it.
        if self.loader.system_bundle_id().is_none() {
            let context = self.framework.context()?;
            self.loader
                .load_system_bundle(SystemBundle::new(context.data_dir()))?;
        }
        if self.loader.system_bundle().is_none() {
            return Err(PlatformError::SystemBundleMissing);
        }

        self.framework.start()?;
        for id in &self.installed_plugins {
            if let Err(e) = self.framework.start_plugin(*id) {
                tracing::warn!(plugin = id, error = %e, "embedded plugin not started");
            }
        }

        self.loader.start_system_bundle(&self.services)?;
        for (id, e) in self.loader.start_eager_bundles(&self.services) {
            tracing::warn!(bundle = %id, error = %e, "eager bundle not started");
        }
        self.loader.resume_system_bundle()?;
        Ok(())
    }

    /// Context for the application named by the configuration, if any.
    ///
    /// With a test plugin the test application is preferred.
    fn application_request(&self) -> Option<ApplicationContext> {
        let test_plugin = self.config.get_string(keys::TESTPLUGIN);
        let id = test_plugin
            .as_ref()
            .and_then(|_| self.config.get_string(keys::TESTAPPLICATION))
            .or_else(|| self.config.get_string(keys::APPLICATION))
            .filter(|id| !id.trim().is_empty())?;

        Some(ApplicationContext::new(
            id,
            self.application_args.clone(),
            test_plugin,
            Arc::clone(&self.services),
        ))
    }

    fn save_state(&self) {
        let snapshot = PlatformStateSnapshot::new(self.app_name.as_str(), self.loader.snapshots());
        let path = self.paths.metadata().join(STATE_FILE);
        match snapshot.save(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "platform state saved"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "platform state not saved"),
        }
    }

    fn teardown(self) {
        let Runtime {
            services,
            mut loader,
            code_cache,
            mut framework,
            ..
        } = self;

        loader.stop_all(&services);
        if let Err(e) = framework.stop() {
            tracing::warn!(error = %e, "embedded framework did not stop cleanly");
        }
        drop(framework);

        drop(services);
        drop(loader);
        drop(code_cache);
    }
}

fn restore_state(paths: &PlatformPaths) {
    let path = paths.metadata().join(STATE_FILE);
    match PlatformStateSnapshot::load(&path) {
        Ok(Some(previous)) => tracing::debug!(
            application = %previous.application,
            saved_at = previous.saved_at,
            bundles = previous.bundles.len(),
            "previous platform state found"
        ),
        Ok(None) => {}
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "previous platform state unreadable"),
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Platform")
            .field("app_name", &self.environment.app_name)
            .field("initialized", &state.initialized)
            .field("running", &state.running)
            .finish()
    }
}
