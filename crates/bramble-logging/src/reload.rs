//! Runtime control of the tracing level filter
//!
//! The tracing subscriber is process-global and installed once, while the
//! platform may be initialized and shut down many times. The filter level
//! therefore lives here, outliving each platform instance: a level requested
//! before the filter exists is kept and applied when it is installed.

use bramble_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, Registry>;

#[derive(Default)]
struct FilterState {
    handle: Option<FilterHandle>,
    level: Option<LogLevel>,
}

/// Level filter shared by every platform initialization in the process
#[derive(Default)]
pub struct ReloadHandle {
    state: Mutex<FilterState>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide instance
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Attach the filter of the installed subscriber.
    ///
    /// Only the first handle is kept, matching the subscriber that won the
    /// global installation. A level requested earlier is applied right away.
    /// Returns whether `handle` was attached.
    pub fn install(&self, handle: FilterHandle) -> bool {
        let mut state = self.state.lock();
        if state.handle.is_some() {
            return false;
        }
        if let Some(level) = state.level {
            if let Err(e) = handle.reload(level_filter(level)) {
                tracing::debug!(error = %e, "pending log level not applied");
            }
        }
        state.handle = Some(handle);
        true
    }

    pub fn is_installed(&self) -> bool {
        self.state.lock().handle.is_some()
    }

    /// Level most recently requested through [`set_level`](Self::set_level)
    pub fn level(&self) -> Option<LogLevel> {
        self.state.lock().level
    }

    /// Request a new filter level.
    ///
    /// Returns `Ok(true)` when the filter changed and `Ok(false)` when no
    /// filter is installed yet; the level is then applied by
    /// [`install`](Self::install). Fails when the subscriber owning the
    /// filter is gone.
    pub fn set_level(&self, level: LogLevel) -> Result<bool, reload::Error> {
        let mut state = self.state.lock();
        state.level = Some(level);
        match &state.handle {
            Some(handle) => handle.reload(level_filter(level)).map(|()| true),
            None => Ok(false),
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn filter() -> (reload::Layer<LevelFilter, Registry>, FilterHandle) {
        reload::Layer::new(LevelFilter::TRACE)
    }

    #[test]
    fn level_filter___maps_off() {
        assert_eq!(level_filter(LogLevel::Off), LevelFilter::OFF);
        assert_eq!(level_filter(LogLevel::Debug), LevelFilter::DEBUG);
    }

    #[test]
    fn ReloadHandle___set_level___before_install_is_deferred() {
        let reload = ReloadHandle::new();
        let (_layer, handle) = filter();

        let applied = reload.set_level(LogLevel::Warn).unwrap();
        let installed = reload.install(handle.clone());

        assert!(!applied);
        assert!(installed);
        assert_eq!(reload.level(), Some(LogLevel::Warn));
        assert_eq!(handle.clone_current(), Some(LevelFilter::WARN));
    }

    #[test]
    fn ReloadHandle___install_twice___keeps_first_filter() {
        let reload = ReloadHandle::new();
        let (_first_layer, first) = filter();
        let (_second_layer, second) = filter();
        assert!(reload.install(first.clone()));

        let replaced = reload.install(second.clone());
        let applied = reload.set_level(LogLevel::Error).unwrap();

        assert!(!replaced);
        assert!(applied);
        assert_eq!(first.clone_current(), Some(LevelFilter::ERROR));
        assert_eq!(second.clone_current(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn ReloadHandle___set_level___subscriber_gone_fails() {
        let reload = ReloadHandle::new();
        let (layer, handle) = filter();
        reload.install(handle);
        drop(layer);

        assert!(reload.set_level(LogLevel::Info).is_err());
        assert!(reload.is_installed());
    }
}
