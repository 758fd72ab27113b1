//! bramble-logging - The platform log channel
//!
//! This crate provides:
//! - [`LogSink`] the process-wide destination of platform log lines (a log file)
//! - [`PlatformLogLayer`] tracing layer that formats events into the sink
//! - [`init_logging`] installing the global subscriber with optional console output
//! - Dynamic log level filtering through [`ReloadHandle`]

mod layer;
mod reload;
mod sink;

pub use bramble_core::LogLevel;
pub use layer::{LoggingConfig, PlatformLogLayer, init_logging};
pub use reload::ReloadHandle;
pub use sink::LogSink;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, LogSink, LoggingConfig, PlatformLogLayer, init_logging};
}
