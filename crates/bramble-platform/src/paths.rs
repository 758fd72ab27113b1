//! Process environment and the resolved filesystem layout

use crate::keys;
use bramble_core::{ConfigLayer, LayeredConfig};
use std::path::{Path, PathBuf};

/// Facts about the host process the platform starts from.
///
/// [`PlatformEnvironment::from_process`] reads them from the running
/// process; tests construct one pointing into a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEnvironment {
    /// Command name; names the user directory and the log file
    pub app_name: String,
    /// First raw command-line argument
    pub argv0: String,
    pub home_dir: PathBuf,
    pub temp_dir: PathBuf,
    /// Instance (working) directory
    pub instance_dir: PathBuf,
    /// Directory searched for `<app_name>.toml`
    pub config_dir: PathBuf,
}

impl PlatformEnvironment {
    /// Environment of the current process.
    ///
    /// The instance and configuration directories default to the directory
    /// holding the executable.
    pub fn from_process() -> Self {
        let argv0 = std::env::args().next().unwrap_or_else(|| "bramble".to_string());
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let temp_dir = std::env::temp_dir();

        Self {
            app_name: command_name(&argv0),
            argv0,
            home_dir: dirs::home_dir().unwrap_or_else(|| temp_dir.clone()),
            temp_dir,
            instance_dir: exe_dir.clone(),
            config_dir: exe_dir,
        }
    }

    /// Environment rooted at `root`: home, temp and instance directories are
    /// subdirectories of it.
    pub fn rooted_at(root: &Path, app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            argv0: app_name.to_string(),
            home_dir: root.join("home"),
            temp_dir: root.join("tmp"),
            instance_dir: root.join("instance"),
            config_dir: root.join("instance"),
        }
    }

    /// Lowest-priority configuration layer holding the `application.*` keys.
    pub fn defaults_layer(&self) -> ConfigLayer {
        ConfigLayer::new()
            .with(keys::APPLICATION_NAME, self.app_name.as_str())
            .with(keys::ARGV0, self.argv0.as_str())
            .with(keys::APPLICATION_DIR, self.instance_dir.display().to_string())
            .with(keys::CONFIG_DIR, self.config_dir.display().to_string())
    }
}

/// File stem of the executable path, the way the command is named in logs.
fn command_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("bramble")
        .to_string()
}

/// The five filesystem roots of a platform instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPaths {
    configuration: PathBuf,
    install: PathBuf,
    instance: PathBuf,
    user: PathBuf,
    base_state: PathBuf,
}

impl PlatformPaths {
    /// Resolve the layout from configuration.
    ///
    /// The install path defaults to the instance path. The user path is
    /// `<home>/.<app-name>`; when it cannot be created the same directory
    /// under the temp directory is used instead.
    pub fn resolve(config: &LayeredConfig, env: &PlatformEnvironment) -> Self {
        let configuration = config
            .get_path(keys::CONFIG_DIR)
            .unwrap_or_else(|| env.config_dir.clone());
        let instance = config
            .get_path(keys::APPLICATION_DIR)
            .unwrap_or_else(|| env.instance_dir.clone());
        let install = config
            .get_path(keys::HOME)
            .unwrap_or_else(|| instance.clone());

        let dir_name = format!(".{}", env.app_name);
        let user = match prepare_dir(&env.home_dir.join(&dir_name)) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    path = %env.home_dir.join(&dir_name).display(),
                    error = %e,
                    "user directory not usable, falling back to temp directory"
                );
                let fallback = env.temp_dir.join(&dir_name);
                if let Err(e) = std::fs::create_dir_all(&fallback) {
                    tracing::warn!(path = %fallback.display(), error = %e, "fallback user directory not created");
                }
                fallback
            }
        };
        let base_state = user.join(".metadata").join(".plugins");

        Self {
            configuration,
            install,
            instance,
            user,
            base_state,
        }
    }

    pub fn configuration(&self) -> &Path {
        &self.configuration
    }

    pub fn install(&self) -> &Path {
        &self.install
    }

    pub fn instance(&self) -> &Path {
        &self.instance
    }

    pub fn user(&self) -> &Path {
        &self.user
    }

    /// `<user>/.metadata/.plugins`
    pub fn base_state(&self) -> &Path {
        &self.base_state
    }

    /// `<user>/.metadata`
    pub fn metadata(&self) -> PathBuf {
        self.user.join(".metadata")
    }

    /// `<user>/<app-name>.log`
    pub fn log_file(&self, app_name: &str) -> PathBuf {
        self.user.join(format!("{app_name}.log"))
    }

    /// `<user>/plugin_cache`
    pub fn default_code_cache(&self) -> PathBuf {
        self.user.join("plugin_cache")
    }

    /// `<instance>/plugins`
    pub fn default_plugin_dir(&self) -> PathBuf {
        self.instance.join("plugins")
    }

    /// Bundle-scoped state directory, created when `create` is set.
    pub fn state_path(&self, symbolic_name: &str, create: bool) -> Option<PathBuf> {
        bramble_core::state_path(&self.base_state, symbolic_name, create)
    }
}

fn prepare_dir(path: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    if std::fs::metadata(path)?.permissions().readonly() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "directory is read-only",
        ));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use bramble_core::priority;
    use tempfile::TempDir;

    fn config_for(env: &PlatformEnvironment) -> LayeredConfig {
        let mut config = LayeredConfig::new();
        config.add(env.defaults_layer(), priority::DEFAULTS);
        config
    }

    #[test]
    fn command_name___strips_directories_and_extension() {
        assert_eq!(command_name("/usr/local/bin/viewer"), "viewer");
        assert_eq!(command_name("C:/apps/viewer.exe"), "viewer");
        assert_eq!(command_name(""), "bramble");
    }

    #[test]
    fn PlatformPaths___resolve___defaults_follow_environment() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");

        let paths = PlatformPaths::resolve(&config_for(&env), &env);

        assert_eq!(paths.instance(), env.instance_dir.as_path());
        assert_eq!(paths.install(), env.instance_dir.as_path());
        assert_eq!(paths.configuration(), env.config_dir.as_path());
        assert_eq!(paths.user(), env.home_dir.join(".viewer").as_path());
        assert_eq!(
            paths.base_state(),
            env.home_dir.join(".viewer/.metadata/.plugins").as_path()
        );
        assert!(paths.user().is_dir());
    }

    #[test]
    fn PlatformPaths___resolve___home_override_sets_install() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");
        let mut config = config_for(&env);
        config.add(
            ConfigLayer::new().with(keys::HOME, "/opt/viewer"),
            priority::FILE,
        );

        let paths = PlatformPaths::resolve(&config, &env);

        assert_eq!(paths.install(), Path::new("/opt/viewer"));
        assert_eq!(paths.instance(), env.instance_dir.as_path());
    }

    #[test]
    fn PlatformPaths___resolve___unusable_home_falls_back_to_temp() {
        let temp = TempDir::new().unwrap();
        let mut env = PlatformEnvironment::rooted_at(temp.path(), "viewer");
        // A file where the home directory should be makes the user dir uncreatable
        std::fs::write(temp.path().join("blocker"), b"").unwrap();
        env.home_dir = temp.path().join("blocker");

        let paths = PlatformPaths::resolve(&config_for(&env), &env);

        assert_eq!(paths.user(), env.temp_dir.join(".viewer").as_path());
        assert!(paths.user().is_dir());
    }

    #[test]
    fn PlatformPaths___derived_paths___live_under_user() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");
        let paths = PlatformPaths::resolve(&config_for(&env), &env);

        assert_eq!(paths.log_file("viewer"), paths.user().join("viewer.log"));
        assert_eq!(paths.default_code_cache(), paths.user().join("plugin_cache"));
        assert_eq!(paths.metadata(), paths.user().join(".metadata"));
        assert_eq!(paths.default_plugin_dir(), env.instance_dir.join("plugins"));
    }

    #[test]
    fn PlatformPaths___state_path___create_makes_bundle_directory() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");
        let paths = PlatformPaths::resolve(&config_for(&env), &env);

        let state = paths.state_path("com.example.foo", true).unwrap();

        assert_eq!(state, paths.base_state().join("com.example.foo"));
        assert!(state.is_dir());
    }

    #[test]
    fn PlatformPaths___state_path___without_create_does_not_touch_disk() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");
        let paths = PlatformPaths::resolve(&config_for(&env), &env);

        let state = paths.state_path("com.example.foo", false);

        assert!(state.is_none());
        assert!(!paths.base_state().join("com.example.foo").exists());
    }

    #[test]
    fn PlatformEnvironment___defaults_layer___carries_application_keys() {
        let temp = TempDir::new().unwrap();
        let env = PlatformEnvironment::rooted_at(temp.path(), "viewer");

        let layer = env.defaults_layer();

        assert_eq!(layer.get(keys::APPLICATION_NAME), Some("viewer"));
        assert_eq!(layer.get(keys::ARGV0), Some("viewer"));
        assert!(layer.contains(keys::APPLICATION_DIR));
        assert!(layer.contains(keys::CONFIG_DIR));
    }
}
