//! # bramble
//!
//! A bundle-based plugin platform for Rust applications.
//!
//! bramble discovers bundles from plugin directories, resolves their
//! declared requirements, and drives them through an explicit lifecycle:
//! - manifest-described bundles with a `INSTALLED -> RESOLVED -> ACTIVE` lifecycle
//! - activators looked up by name and run on start/stop
//! - a content-addressed code cache for bundle libraries
//! - extension points published through a service registry
//! - a process-wide platform with layered configuration and a log channel
//!
//! ## Writing a Bundle
//!
//! A bundle is a directory holding a `manifest.json`:
//!
//! ```json
//! {
//!   "manifest_version": "1.0",
//!   "bundle": {
//!     "symbolic_name": "org.example.viewer",
//!     "version": "1.0.0",
//!     "activator": "viewer",
//!     "activation": "eager"
//!   },
//!   "requires": ["org.example.core"]
//! }
//! ```
//!
//! The activator named in the manifest is registered with the platform
//! before it is initialized:
//!
//! ```no_run
//! use bramble::prelude::*;
//!
//! struct ViewerActivator;
//!
//! impl Activator for ViewerActivator {
//!     fn start(&mut self, ctx: &BundleContext<'_>) -> BrambleResult<()> {
//!         tracing::info!(bundle = ctx.symbolic_name(), "viewer started");
//!         Ok(())
//!     }
//!
//!     fn stop(&mut self, _ctx: &BundleContext<'_>) -> BrambleResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), PlatformError> {
//! let platform = Platform::global();
//! platform.register_activator("viewer", || Box::new(ViewerActivator) as Box<dyn Activator>);
//! platform.register_application("org.example.viewer.app", |ctx: &ApplicationContext| {
//!     println!("{} arguments", ctx.args().len());
//!     EXIT_OK
//! });
//!
//! let args: Vec<String> = std::env::args().collect();
//! platform.initialize(args.as_slice(), None)?;
//! let code = platform.launch()?;
//! platform.shutdown()?;
//! std::process::exit(code);
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`bramble_core`] - lifecycle states, activators, services, configuration
//! - [`bramble_bundle`] - manifests, code cache, bundle loader and resolution
//! - [`bramble_logging`] - platform log channel
//! - [`bramble_platform`] - the platform orchestrator

// Re-export core types
pub use bramble_core::{
    Activator, ActivatorRegistry, BrambleError, BrambleResult, BundleContext, BundleState,
    ConfigLayer, LayeredConfig, LogLevel, ServiceRegistry, priority,
};

// Re-export bundle types
pub use bramble_bundle::{
    ActivationPolicy, BundleError, BundleId, BundleLoader, BundleManifest, BundleResult,
    BundleSnapshot, CacheKey, CodeCache, Extension, ExtensionPoint, ExtensionPointService,
    SYSTEM_BUNDLE_NAME,
};

// Re-export logging types
pub use bramble_logging::{LogSink, LoggingConfig};

// Re-export platform types
pub use bramble_platform::{
    Application, ApplicationContext, EXIT_OK, EXIT_SOFTWARE, EmbeddedFramework, InitOutcome,
    LocalFramework, Platform, PlatformEnvironment, PlatformError, PlatformPaths, PlatformResult,
    keys,
};

// Re-export common dependencies that bundle authors need
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use bramble::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        Activator, ApplicationContext, BrambleError, BrambleResult, BundleContext, BundleState,
        EXIT_OK, InitOutcome, LogLevel, Platform, PlatformError, ServiceRegistry,
    };

    pub use serde::{Deserialize, Serialize};
}
