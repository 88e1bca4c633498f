//! Configuration and Stylesheet Hot-Reload
//!
//! Watches the config file and the active stylesheet for changes, sending
//! reload events through a channel for the application to handle.

use notify::{
    Config as NotifyConfig, Event, RecommendedWatcher, RecursiveMode, Watcher,
    event::ModifyKind,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::{Config, ConfigError};

/// Events emitted by the configuration watcher
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// Configuration file changed, contains new config
    ConfigReloaded(Config),
    /// Stylesheet changed, contains new CSS content
    StylesheetReloaded(String),
    /// Error occurred during reload
    ReloadError(String),
}

/// Watches configuration and stylesheet files for changes
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<ConfigEvent>,
}

/// Drops events arriving within `window` of the previous accepted one
struct EventGate {
    window: Duration,
    last: Option<Instant>,
}

impl EventGate {
    fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.duration_since(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl ConfigWatcher {
    fn start(
        config_file: PathBuf,
        stylesheet: Option<PathBuf>,
        debounce: Duration,
    ) -> Result<Self, ConfigError> {
        let (tx, rx) = mpsc::channel();

        let mut config_gate = EventGate::new(debounce);
        let mut stylesheet_gate = EventGate::new(debounce);

        let config_file_clone = config_file.clone();
        let stylesheet_clone = stylesheet.clone();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        // Only handle writes and file creation (editors that swap files)
                        let relevant = matches!(event.kind, notify::EventKind::Modify(ModifyKind::Data(_)))
                            || event.kind.is_create();
                        if !relevant {
                            return;
                        }

                        for path in &event.paths {
                            if path == &config_file_clone {
                                if !config_gate.accept(Instant::now()) {
                                    continue;
                                }

                                log::info!("Config file changed, reloading...");
                                match Config::load_from(path) {
                                    Ok(new_config) => {
                                        let _ = tx.send(ConfigEvent::ConfigReloaded(new_config));
                                    }
                                    Err(e) => {
                                        log::error!("Failed to reload config: {}", e);
                                        let _ = tx.send(ConfigEvent::ReloadError(e.to_string()));
                                    }
                                }
                            }

                            if stylesheet_clone.as_ref() == Some(path) {
                                if !stylesheet_gate.accept(Instant::now()) {
                                    continue;
                                }

                                log::info!("Stylesheet changed, reloading...");
                                match std::fs::read_to_string(path) {
                                    Ok(css) => {
                                        let _ = tx.send(ConfigEvent::StylesheetReloaded(css));
                                    }
                                    Err(e) => {
                                        log::error!("Failed to reload stylesheet: {}", e);
                                        let _ = tx.send(ConfigEvent::ReloadError(e.to_string()));
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Watch error: {:?}", e);
                    }
                }
            },
            NotifyConfig::default().with_poll_interval(Duration::from_secs(1)),
        )
        .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        // Watch parent directories so replaced files are still seen
        let mut dirs: Vec<&Path> = Vec::new();
        for file in std::iter::once(&config_file).chain(stylesheet.as_ref()) {
            if let Some(dir) = file.parent().filter(|d| d.exists()) {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }

        for dir in dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|e| ConfigError::WatchError(e.to_string()))?;
            log::info!("Watching directory: {:?}", dir);
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Try to receive a config event without blocking
    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConfigEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

/// Builder for creating a ConfigWatcher with custom options
pub struct ConfigWatcherBuilder {
    debounce_ms: u64,
    watch_stylesheet: bool,
}

impl Default for ConfigWatcherBuilder {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            watch_stylesheet: true,
        }
    }
}

impl ConfigWatcherBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set debounce duration in milliseconds
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Enable or disable stylesheet watching
    pub fn watch_stylesheet(mut self, watch: bool) -> Self {
        self.watch_stylesheet = watch;
        self
    }

    /// Build a watcher for a config file and an optional stylesheet file
    pub fn build(self, config_file: &Path, stylesheet: Option<&Path>) -> Result<ConfigWatcher, ConfigError> {
        let stylesheet = stylesheet
            .filter(|_| self.watch_stylesheet)
            .map(Path::to_path_buf);
        ConfigWatcher::start(
            config_file.to_path_buf(),
            stylesheet,
            Duration::from_millis(self.debounce_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_event_debug() {
        let config = Config::default();
        let event = ConfigEvent::ConfigReloaded(config);
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("ConfigReloaded"));
    }

    #[test]
    fn test_stylesheet_reloaded_event() {
        let css = ".small-dots { --count: 10; }".to_string();
        let event = ConfigEvent::StylesheetReloaded(css.clone());
        match event {
            ConfigEvent::StylesheetReloaded(content) => assert_eq!(content, css),
            _ => panic!("Expected StylesheetReloaded"),
        }
    }

    #[test]
    fn test_event_gate() {
        let mut gate = EventGate::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(gate.accept(t0));
        assert!(!gate.accept(t0 + Duration::from_millis(50)));
        assert!(gate.accept(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn test_watcher_builder_default() {
        let builder = ConfigWatcherBuilder::new();
        assert_eq!(builder.debounce_ms, 100);
        assert!(builder.watch_stylesheet);
    }

    #[test]
    fn test_watcher_builder_fluent() {
        let builder = ConfigWatcherBuilder::new()
            .debounce_ms(200)
            .watch_stylesheet(false);
        assert_eq!(builder.debounce_ms, 200);
        assert!(!builder.watch_stylesheet);
    }

    #[test]
    fn test_watch_temp_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, "").unwrap();

        let watcher = ConfigWatcherBuilder::new().build(&config_file, None);
        assert!(watcher.is_ok());
        assert!(watcher.unwrap().try_recv().is_none());
    }
}
