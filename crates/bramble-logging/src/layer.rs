//! Tracing layer that writes platform log lines to the [`LogSink`]

use crate::reload::ReloadHandle;
use crate::sink::LogSink;
use bramble_core::LogLevel;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that formats events as platform log lines
pub struct PlatformLogLayer {
    sink: &'static LogSink,
}

impl PlatformLogLayer {
    /// Create a layer writing to the global sink
    pub fn new() -> Self {
        Self {
            sink: LogSink::global(),
        }
    }

    /// Create a layer with a specific sink
    pub fn with_sink(sink: &'static LogSink) -> Self {
        Self { sink }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }

    /// Format one line: `<secs>.<millis> LEVEL target: message key=value...`
    fn format_line(level: LogLevel, target: &str, message: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        format!(
            "{}.{:03} {:<5} {}: {}",
            now.as_secs(),
            now.subsec_millis(),
            level.to_string(),
            target,
            message
        )
    }
}

impl Default for PlatformLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for PlatformLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());

        if !self.sink.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = Self::format_line(level, metadata.target(), &visitor.into_message());
        self.sink.write_line(level, &line);
    }
}

/// Collects the message and structured fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn into_message(self) -> String {
        let mut out = self.message.unwrap_or_default();
        for field in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&field);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Options for [`init_logging`]
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Platform log file; `None` keeps the current destination
    pub log_file: Option<PathBuf>,
    /// Mirror log output to stderr
    pub console: bool,
    /// Minimum level
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            console: false,
            level: LogLevel::Info,
        }
    }
}

impl LoggingConfig {
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

/// Initialize the platform log channel
///
/// Points the global [`LogSink`] at the configured file and applies the
/// level and console settings. The global subscriber is installed on the
/// first call only; later calls just reconfigure the sink, so the function
/// is safe to call on every platform initialization.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
    use tracing_subscriber::filter::{LevelFilter, filter_fn};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::reload;

    let sink = LogSink::global();
    sink.set_level(config.level);
    sink.set_console(config.console);

    let (filter, handle) = reload::Layer::new(LevelFilter::TRACE);
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter_fn(|_| LogSink::global().console_enabled()));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(PlatformLogLayer::new())
        .with(console);

    // Only the first installation succeeds; later ones reuse the subscriber
    let reload = ReloadHandle::global();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        reload.install(handle);
    }
    if let Err(e) = reload.set_level(config.level) {
        tracing::warn!(error = %e, "log level filter not reloaded");
    }

    match &config.log_file {
        Some(path) => sink.open_file(path),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
