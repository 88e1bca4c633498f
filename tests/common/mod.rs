//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - Test environment setup (temp config directory, stylesheets)
//! - Page harness driving a Background over a mock or HTML page
//! - Assertion utilities

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use stardrift::{Background, RegenerationReport, build_presets};
use stardrift_config::Config;
use stardrift_core::{FieldPreset, seeded_rng};
use stardrift_render::{HtmlPage, MockPage};
use tempfile::TempDir;

/// Test environment with isolated config directory
pub struct TestEnvironment {
    /// Temporary directory for test config
    pub temp_dir: TempDir,
    /// Path to the config directory
    pub config_dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_dir = temp_dir.path().to_path_buf();

        // Create themes subdirectory
        std::fs::create_dir_all(config_dir.join("themes"))
            .expect("Failed to create themes directory");

        Self {
            temp_dir,
            config_dir,
        }
    }

    /// Path of the config file inside the environment
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Write a test config file
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write test config");
    }

    /// Write a test stylesheet and return its path
    pub fn write_stylesheet(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config_dir.join("themes").join(format!("{}.css", name));
        std::fs::write(&path, content).expect("Failed to write test stylesheet");
        path
    }

    /// Load the written config file
    pub fn load_config(&self) -> Config {
        Config::load_from(&self.config_path()).expect("Failed to load test config")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Page with every container the built-in fields use
pub fn full_mock_page(width: f64, cards: usize) -> MockPage {
    MockPage::new()
        .with_widths(Some(width), Some(width))
        .with_selectors(FieldPreset::flowing_background().containers())
        .with_selectors(["#skills", ".skills-fly-stars"])
        .with_cards(".skills .skills-grid", ".skill-category", cards)
}

/// Harness driving a background controller through page events
pub struct PageHarness<H: stardrift_render::PageHost> {
    pub background: Background<H>,
    start: Instant,
}

impl PageHarness<MockPage> {
    /// Mock page with all built-in fields enabled
    pub fn mock(width: f64, cards: usize, seed: u64) -> Self {
        let presets = build_presets(&["background", "skills-crossing", "card-rails"], "")
            .expect("built-in presets are valid");
        Self::with(full_mock_page(width, cards), presets, seed)
    }

    /// Change the reported viewport width
    pub fn set_width(&mut self, width: f64) {
        let page = self.background.host_mut();
        page.client_width = Some(width);
        page.inner_width = Some(width);
    }
}

impl PageHarness<HtmlPage> {
    /// Portfolio snapshot with all built-in fields and a stylesheet
    pub fn html(width: f64, cards: usize, css: &str, seed: u64) -> Self {
        let presets = build_presets(&["background", "skills-crossing", "card-rails"], css)
            .expect("stylesheet should apply");
        Self::with(HtmlPage::portfolio(width, cards), presets, seed)
    }
}

impl<H: stardrift_render::PageHost> PageHarness<H> {
    pub fn with(host: H, presets: Vec<FieldPreset>, seed: u64) -> Self {
        Self {
            background: Background::new(host, presets, seeded_rng(seed)),
            start: Instant::now(),
        }
    }

    /// Instant `ms` milliseconds after the harness was created
    pub fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    pub fn load(&mut self) -> RegenerationReport {
        self.background.on_load().expect("load should not fail")
    }

    pub fn resize_at(&mut self, ms: u64) {
        let now = self.at(ms);
        self.background.on_resize_at(now);
    }

    pub fn tick_at(&mut self, ms: u64) -> Option<RegenerationReport> {
        let now = self.at(ms);
        self.background.tick_at(now).expect("tick should not fail")
    }
}
