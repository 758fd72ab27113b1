//! bramble-core - Core types, lifecycle states, services and configuration
//!
//! This crate provides the foundational types shared by the bramble platform:
//! - [`BundleState`] for the bundle lifecycle state machine
//! - [`BrambleError`] for error handling
//! - [`Activator`] and [`BundleContext`] for bundle activation
//! - [`ServiceRegistry`] for locating platform services
//! - [`LayeredConfig`] for prioritized configuration lookup

mod activator;
mod config;
mod error;
mod lifecycle;
mod services;

pub use activator::{Activator, ActivatorFactory, ActivatorRegistry, BundleContext, state_path};
pub use config::{ConfigLayer, LayeredConfig, priority};
pub use error::{BrambleError, BrambleResult};
pub use lifecycle::BundleState;
pub use services::ServiceRegistry;

/// Log levels understood by the platform log channel
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name as found in configuration files (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" | "none" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Activator, ActivatorRegistry, BrambleError, BrambleResult, BundleContext, BundleState,
        ConfigLayer, LayeredConfig, LogLevel, ServiceRegistry,
    };
}

#[cfg(test)]
mod lib_tests;
