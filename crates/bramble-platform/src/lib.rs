//! bramble-platform - The platform orchestrator
//!
//! [`Platform`] owns the code cache, the bundle loader and the service
//! registry for the lifetime of one initialization. It parses command-line
//! options, layers configuration, resolves the filesystem layout, brings up
//! the embedded plugin framework, loads and resolves bundles, and finally
//! launches the configured [`Application`].
//!
//! # Example
//!
//! ```no_run
//! use bramble_platform::{InitOutcome, Platform, PlatformEnvironment};
//!
//! let platform = Platform::new(PlatformEnvironment::from_process());
//! platform.register_application("org.example.app", |ctx: &bramble_platform::ApplicationContext| {
//!     println!("running with {:?}", ctx.args());
//!     bramble_platform::EXIT_OK
//! });
//!
//! let args: Vec<String> = std::env::args().collect();
//! if let InitOutcome::HelpRequested(help) = platform.initialize(&args, None)? {
//!     println!("{help}");
//!     return Ok(());
//! }
//! let code = platform.launch()?;
//! platform.shutdown()?;
//! std::process::exit(code);
//! # Ok::<(), bramble_platform::PlatformError>(())
//! ```

mod application;
mod diagnostics;
mod error;
mod framework;
mod options;
mod paths;
mod platform;

pub use application::{
    Application, ApplicationContext, ApplicationRegistry, EXIT_OK, EXIT_SOFTWARE,
};
pub use diagnostics::{PlatformStateSnapshot, STATE_FILE};
pub use error::{FrameworkError, FrameworkResult, PlatformError, PlatformResult};
pub use framework::{
    EmbeddedFramework, EmbeddedPlugin, FRAMEWORK_PLUGIN_ID, FrameworkContext, FrameworkState,
    LocalFramework, PluginId, plugin_symbolic_name,
};
pub use options::{ParsedOptions, PlatformArgs};
pub use paths::{PlatformEnvironment, PlatformPaths};
pub use platform::{InitOutcome, Platform};

/// Configuration keys understood by the platform
pub mod keys {
    /// Directory holding `<app-name>.toml`
    pub const CONFIG_DIR: &str = "application.configDir";
    /// Instance (working) directory
    pub const APPLICATION_DIR: &str = "application.dir";
    /// Application name, used for the user directory and log file
    pub const APPLICATION_NAME: &str = "application.name";
    /// First raw command-line argument
    pub const ARGV0: &str = "application.argv[0]";

    /// Install path override
    pub const HOME: &str = "platform.home";
    /// Code cache root override
    pub const PLUGIN_CACHE: &str = "platform.plugin_cache";
    /// Semicolon-delimited plugin base directories
    pub const PLUGIN_DIRS: &str = "platform.plugin_dirs";
    /// Clear the code cache before loading bundles
    pub const CLEAN: &str = "platform.clean";
    /// Mirror the platform log to the console
    pub const CONSOLELOG: &str = "platform.consolelog";
    /// Id of the application to run
    pub const APPLICATION: &str = "platform.application";
    /// Bundle under test
    pub const TESTPLUGIN: &str = "platform.testplugin";
    /// Application to run when a test plugin is given
    pub const TESTAPPLICATION: &str = "platform.testapplication";
    /// Minimum level of the platform log
    pub const LOG_LEVEL: &str = "platform.log_level";
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Application, ApplicationContext, EXIT_OK, InitOutcome, Platform, PlatformEnvironment,
        PlatformError, PlatformResult,
    };
}
