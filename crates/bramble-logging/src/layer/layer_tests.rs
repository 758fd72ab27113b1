#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn leaked_sink(level: LogLevel) -> (&'static LogSink, SharedBuffer) {
    let sink: &'static LogSink = Box::leak(Box::new(LogSink::new()));
    let buffer = SharedBuffer::default();
    sink.set_writer(Box::new(buffer.clone()));
    sink.set_level(level);
    (sink, buffer)
}

// PlatformLogLayer tests

#[test]
fn PlatformLogLayer___convert_level___maps_every_level() {
    assert_eq!(PlatformLogLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(PlatformLogLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(PlatformLogLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(PlatformLogLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(PlatformLogLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn PlatformLogLayer___format_line___contains_level_target_and_message() {
    let line = PlatformLogLayer::format_line(LogLevel::Warn, "bramble::loader", "hello");

    assert!(line.contains(" WARN  bramble::loader: hello"), "{line}");
}

#[test]
fn PlatformLogLayer___events___filtered_below_level() {
    let (sink, buffer) = leaked_sink(LogLevel::Info);
    let subscriber = tracing_subscriber::registry().with(PlatformLogLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Test info message");
        tracing::debug!("Test debug message");
        tracing::error!("Test error message");
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Test info message"));
    assert!(lines[1].contains("ERROR"));
}

#[test]
fn PlatformLogLayer___structured_fields___appended_to_message() {
    let (sink, buffer) = leaked_sink(LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(PlatformLogLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(bundle = "org.example.core", state = %"RESOLVED", count = 3, "Bundle state");
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.contains("Bundle state"), "{line}");
    assert!(line.contains("bundle=org.example.core"), "{line}");
    assert!(line.contains("state=RESOLVED"), "{line}");
    assert!(line.contains("count=3"), "{line}");
}

#[test]
fn PlatformLogLayer___message_only___no_extra_fields() {
    let (sink, buffer) = leaked_sink(LogLevel::Info);
    let subscriber = tracing_subscriber::registry().with(PlatformLogLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("Simple message");
    });

    let lines = buffer.lines();
    assert!(lines[0].ends_with(": Simple message"), "{}", lines[0]);
}

#[test]
fn PlatformLogLayer___level_change___takes_effect_immediately() {
    let (sink, buffer) = leaked_sink(LogLevel::Error);
    let subscriber = tracing_subscriber::registry().with(PlatformLogLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("dropped");
        sink.set_level(LogLevel::Warn);
        tracing::warn!("kept");
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("kept"));
}

// LoggingConfig tests

#[test]
fn LoggingConfig___default___info_without_console() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(!config.console);
    assert!(config.log_file.is_none());
}

#[test]
fn LoggingConfig___builders___set_fields() {
    let config = LoggingConfig::default()
        .with_log_file("/tmp/app.log")
        .with_console(true)
        .with_level(LogLevel::Debug);

    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/app.log")));
    assert!(config.console);
    assert_eq!(config.level, LogLevel::Debug);
}

#[test]
fn init_logging___twice___reconfigures_global_sink() {
    let temp = tempfile::TempDir::new().unwrap();
    let first = temp.path().join("first.log");
    let second = temp.path().join("second.log");

    init_logging(&LoggingConfig::default().with_log_file(&first)).unwrap();
    init_logging(
        &LoggingConfig::default()
            .with_log_file(&second)
            .with_level(LogLevel::Warn),
    )
    .unwrap();

    assert_eq!(LogSink::global().path(), Some(second.clone()));
    assert_eq!(LogSink::global().level(), LogLevel::Warn);
    assert!(second.exists());
    LogSink::global().close();
}
