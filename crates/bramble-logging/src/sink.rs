//! Platform log file management

use bramble_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Global log sink
static LOG_SINK: OnceCell<LogSink> = OnceCell::new();

/// Destination of platform log lines.
///
/// The subscriber is installed once per process, but the platform may be
/// initialized again (for example after a shutdown). The sink therefore lives
/// outside the subscriber and can be redirected to a new file at any time.
pub struct LogSink {
    writer: Mutex<Option<Box<dyn Write + Send>>>,
    path: Mutex<Option<PathBuf>>,
    level: AtomicU8,
    console: AtomicBool,
}

impl LogSink {
    /// Create a sink with no destination
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(None),
            path: Mutex::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
            console: AtomicBool::new(false),
        }
    }

    /// Get the global sink instance
    pub fn global() -> &'static LogSink {
        LOG_SINK.get_or_init(LogSink::new)
    }

    /// Append to the log file at `path`, creating it and its parent directory.
    pub fn open_file(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.set_writer(Box::new(file));
        *self.path.lock() = Some(path.to_path_buf());
        Ok(())
    }

    /// Send log lines to an arbitrary writer
    pub fn set_writer(&self, writer: Box<dyn Write + Send>) {
        let mut guard = self.writer.lock();
        if let Some(previous) = guard.as_mut() {
            let _ = previous.flush();
        }
        *guard = Some(writer);
        *self.path.lock() = None;
    }

    /// Flush and drop the current destination
    pub fn close(&self) {
        if let Some(mut writer) = self.writer.lock().take() {
            let _ = writer.flush();
        }
        *self.path.lock() = None;
    }

    /// Path of the current log file, if the sink writes to one
    pub fn path(&self) -> Option<PathBuf> {
        self.path.lock().clone()
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Set the minimum level written to the sink
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Get the current log level
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is enabled
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Mirror platform log lines to the console
    pub fn set_console(&self, enabled: bool) {
        self.console.store(enabled, Ordering::SeqCst);
    }

    pub fn console_enabled(&self) -> bool {
        self.console.load(Ordering::SeqCst)
    }

    /// Write one formatted line if the level is enabled and a destination is set.
    pub fn write_line(&self, level: LogLevel, line: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let mut guard = self.writer.lock();
        let Some(writer) = guard.as_mut() else {
            return;
        };
        // A failing log file must never take the platform down
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSink")
            .field("path", &self.path())
            .field("level", &self.level())
            .field("console", &self.console_enabled())
            .finish()
    }
}
