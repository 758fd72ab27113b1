//! Secondary plugin framework embedded in the platform
//!
//! The platform treats the embedded framework as an opaque collaborator
//! reached through [`EmbeddedFramework`]. [`LocalFramework`] is the
//! in-process implementation used by default: it discovers plugin libraries
//! in its search paths and tracks their lifecycle.

use crate::error::{FrameworkError, FrameworkResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a plugin installed in the embedded framework
pub type PluginId = u64;

/// Id reserved for the framework itself
pub const FRAMEWORK_PLUGIN_ID: PluginId = 0;

const LIBRARY_EXTENSIONS: [&str; 3] = ["so", "dylib", "dll"];

/// Lifecycle of the embedded framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameworkState {
    #[default]
    Created,
    Initialized,
    Active,
    Stopped,
}

impl fmt::Display for FrameworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameworkState::Created => "Created",
            FrameworkState::Initialized => "Initialized",
            FrameworkState::Active => "Active",
            FrameworkState::Stopped => "Stopped",
        };
        f.write_str(name)
    }
}

/// A plugin installed in the embedded framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPlugin {
    pub id: PluginId,
    pub symbolic_name: String,
    pub location: PathBuf,
    pub active: bool,
}

/// Context of the running framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkContext {
    data_dir: PathBuf,
}

impl FrameworkContext {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Persistent data directory of the framework
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a file inside the data directory
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

/// Capabilities the platform needs from an embedded plugin framework
pub trait EmbeddedFramework: Send {
    /// Prepare the framework with its storage directory
    fn init(&mut self, storage: &Path) -> FrameworkResult<()>;

    /// Add a directory searched by [`install`](Self::install)
    fn add_search_path(&mut self, dir: &Path);

    /// Symbolic names of the plugins found in `dir`
    fn plugin_symbolic_names(&self, dir: &Path) -> Vec<String>;

    /// Install the plugin with the given symbolic name from the search paths
    fn install(&mut self, symbolic_name: &str) -> FrameworkResult<PluginId>;

    /// Start the framework itself
    fn start(&mut self) -> FrameworkResult<()>;

    /// Start an installed plugin
    fn start_plugin(&mut self, id: PluginId) -> FrameworkResult<()>;

    fn plugin(&self, id: PluginId) -> Option<EmbeddedPlugin>;

    fn context(&self) -> FrameworkResult<FrameworkContext>;

    /// Stop all plugins and the framework
    fn stop(&mut self) -> FrameworkResult<()>;
}

/// Convert a plugin library file name to its symbolic name.
///
/// `liborg_example_core.so` becomes `org.example.core`. Returns `None` for
/// files that are not plugin libraries.
pub fn plugin_symbolic_name(file_name: &str) -> Option<String> {
    let path = Path::new(file_name);
    let extension = path.extension()?.to_str()?;
    if !LIBRARY_EXTENSIONS.contains(&extension) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let stem = stem.strip_prefix("lib").unwrap_or(stem);
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace('_', "."))
}

/// In-process [`EmbeddedFramework`]
#[derive(Debug, Default)]
pub struct LocalFramework {
    state: FrameworkState,
    storage: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    plugins: Vec<EmbeddedPlugin>,
}

impl LocalFramework {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FrameworkState {
        self.state
    }

    pub fn plugins(&self) -> &[EmbeddedPlugin] {
        &self.plugins
    }

    fn require(&self, expected: &[FrameworkState]) -> FrameworkResult<()> {
        if expected.contains(&self.state) {
            return Ok(());
        }
        let expected = expected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(FrameworkError::InvalidState {
            expected,
            actual: self.state.to_string(),
        })
    }

    fn find_library(&self, symbolic_name: &str) -> Option<PathBuf> {
        self.search_paths.iter().find_map(|dir| {
            std::fs::read_dir(dir)
                .ok()?
                .flatten()
                .map(|entry| entry.path())
                .find(|path| {
                    path.is_file()
                        && path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .and_then(plugin_symbolic_name)
                            .is_some_and(|name| name == symbolic_name)
                })
        })
    }

    fn plugin_mut(&mut self, id: PluginId) -> FrameworkResult<&mut EmbeddedPlugin> {
        self.plugins
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FrameworkError::UnknownPlugin(id))
    }
}

impl EmbeddedFramework for LocalFramework {
    fn init(&mut self, storage: &Path) -> FrameworkResult<()> {
        self.require(&[FrameworkState::Created, FrameworkState::Stopped])?;
        std::fs::create_dir_all(storage)?;
        self.storage = Some(storage.to_path_buf());
        self.state = FrameworkState::Initialized;
        tracing::debug!(storage = %storage.display(), "embedded framework initialized");
        Ok(())
    }

    fn add_search_path(&mut self, dir: &Path) {
        if !self.search_paths.iter().any(|p| p == dir) {
            self.search_paths.push(dir.to_path_buf());
        }
    }

    fn plugin_symbolic_names(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            tracing::debug!(dir = %dir.display(), "no embedded plugin directory");
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().and_then(plugin_symbolic_name))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn install(&mut self, symbolic_name: &str) -> FrameworkResult<PluginId> {
        self.require(&[FrameworkState::Initialized, FrameworkState::Active])?;

        if let Some(existing) = self.plugins.iter().find(|p| p.symbolic_name == symbolic_name) {
            return Ok(existing.id);
        }
        let location = self
            .find_library(symbolic_name)
            .ok_or_else(|| FrameworkError::PluginNotFound(symbolic_name.to_string()))?;

        let id = self.plugins.len() as PluginId + 1;
        self.plugins.push(EmbeddedPlugin {
            id,
            symbolic_name: symbolic_name.to_string(),
            location,
            active: false,
        });
        tracing::debug!(plugin = symbolic_name, id, "embedded plugin installed");
        Ok(id)
    }

    fn start(&mut self) -> FrameworkResult<()> {
        if self.state == FrameworkState::Active {
            return Ok(());
        }
        self.require(&[FrameworkState::Initialized])?;
        self.state = FrameworkState::Active;
        tracing::info!(plugins = self.plugins.len(), "embedded framework started");
        Ok(())
    }

    fn start_plugin(&mut self, id: PluginId) -> FrameworkResult<()> {
        self.require(&[FrameworkState::Active])?;
        let plugin = self.plugin_mut(id)?;
        if !plugin.location.is_file() {
            return Err(FrameworkError::PluginFailed {
                name: plugin.symbolic_name.clone(),
                reason: format!("library {} is gone", plugin.location.display()),
            });
        }
        plugin.active = true;
        tracing::debug!(plugin = %plugin.symbolic_name, id, "embedded plugin started");
        Ok(())
    }

    fn plugin(&self, id: PluginId) -> Option<EmbeddedPlugin> {
        self.plugins.iter().find(|p| p.id == id).cloned()
    }

    fn context(&self) -> FrameworkResult<FrameworkContext> {
        self.require(&[FrameworkState::Initialized, FrameworkState::Active])?;
        let storage = self.storage.as_deref().ok_or(FrameworkError::InvalidState {
            expected: FrameworkState::Initialized.to_string(),
            actual: self.state.to_string(),
        })?;
        Ok(FrameworkContext::new(
            storage.join("data").join(FRAMEWORK_PLUGIN_ID.to_string()),
        ))
    }

    fn stop(&mut self) -> FrameworkResult<()> {
        if matches!(self.state, FrameworkState::Created | FrameworkState::Stopped) {
            return Ok(());
        }
        for plugin in self.plugins.iter_mut().rev() {
            plugin.active = false;
        }
        self.state = FrameworkState::Stopped;
        tracing::debug!("embedded framework stopped");
        Ok(())
    }
}
