//! Layered platform configuration

use crate::{BrambleError, BrambleResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed layer priorities. Lower values are consulted first.
pub mod priority {
    /// Options given on the command line
    pub const COMMAND_LINE: i32 = -100;
    /// The platform configuration file
    pub const FILE: i32 = 0;
    /// Programmatic overlay handed to `initialize`
    pub const OVERLAY: i32 = 50;
    /// Values computed by the platform itself
    pub const DEFAULTS: i32 = 100;
}

/// A flat set of dotted-key properties
///
/// Nested TOML tables are flattened so that
/// ```toml
/// [platform]
/// plugin_dirs = "a;b"
/// ```
/// is read back as `platform.plugin_dirs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    properties: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a raw property value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Check whether the property is present
    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Number of properties in this layer
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check whether the layer holds no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate over all keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Parse a layer from TOML text
    pub fn from_toml_str(content: &str) -> BrambleResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut layer = Self::new();
        flatten_table("", &table, &mut layer.properties);
        Ok(layer)
    }

    /// Load a layer from a TOML file
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn from_toml_file(path: &Path) -> BrambleResult<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            BrambleError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map(Some)
    }
}

fn flatten_table(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, out),
            other => {
                out.insert(full_key, scalar_to_string(other));
            }
        }
    }
}

// Arrays are joined with ';' so list-valued keys share one syntax with
// their command-line and overlay forms.
fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(";"),
        toml::Value::Table(_) => String::new(),
    }
}

/// Prioritized stack of configuration layers
///
/// Lookups walk the layers from the lowest priority number upwards and
/// return the first hit. Layers with equal priority keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<(i32, ConfigLayer)>,
}

impl LayeredConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer at the given priority
    pub fn add(&mut self, layer: ConfigLayer, priority: i32) {
        let index = self
            .layers
            .iter()
            .position(|(p, _)| *p > priority)
            .unwrap_or(self.layers.len());
        self.layers.insert(index, (priority, layer));
    }

    /// Mutable access to the first layer registered at `priority`, creating it if needed
    pub fn layer_mut(&mut self, priority: i32) -> &mut ConfigLayer {
        let index = match self.layers.iter().position(|(p, _)| *p == priority) {
            Some(index) => index,
            None => {
                self.add(ConfigLayer::new(), priority);
                self.layers
                    .iter()
                    .position(|(p, _)| *p == priority)
                    .unwrap_or(0)
            }
        };
        &mut self.layers[index].1
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Check whether any layer defines the property
    pub fn has_property(&self, key: &str) -> bool {
        self.layers.iter().any(|(_, layer)| layer.contains(key))
    }

    /// Get a string property
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.layers
            .iter()
            .find_map(|(_, layer)| layer.get(key))
            .map(str::to_string)
    }

    /// Get a string property with a fallback
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a boolean property
    ///
    /// A present key with an empty value counts as `true` (flag semantics).
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get_string(key)?;
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// Get a boolean flag, treating absent or unparsable values as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.get_bool(key).unwrap_or(false)
    }

    /// Get a path property
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get_string(key)
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(s.trim()))
    }

    /// Get a semicolon-delimited list, trimmed, with empty tokens dropped
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get_string(key)
            .map(|value| split_list(&value))
            .unwrap_or_default()
    }

    /// Get a property parsed with [`std::str::FromStr`]
    pub fn get_parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get_string(key)?.trim().parse().ok()
    }
}

/// Split a semicolon-delimited list, trimming tokens and dropping empty ones
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
