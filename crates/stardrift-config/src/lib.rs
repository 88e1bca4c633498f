//! Stardrift Configuration Management
//!
//! Handles loading and managing configuration from ~/.stardrift/config.toml
//! Supports hot-reloading and default config generation.

pub mod themes;
pub mod watcher;

pub use themes::{BundledStylesheet, bundled_stylesheet_names, get_bundled_stylesheet};
pub use watcher::{ConfigEvent, ConfigWatcher, ConfigWatcherBuilder};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = ".stardrift";
/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";
/// Default stylesheets directory name
const THEMES_DIR_NAME: &str = "themes";
/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "STARDRIFT_CONFIG_DIR";

/// Viewport configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width used when the host cannot report one
    pub width: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 1280.0 }
    }
}

/// Motion configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Act as if the reduced-motion preference were set
    pub reduced: bool,
    /// Quiet period before a resize regenerates the fields
    pub resize_debounce_ms: u64,
    /// Fixed random seed; a fresh seed is used per run when unset
    pub seed: Option<u64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced: false,
            resize_debounce_ms: 300,
            seed: None,
        }
    }
}

/// Page configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Flags present on the page body, e.g. "show-skills-stars"
    pub flags: Vec<String>,
    /// Number of skill cards in generated page snapshots
    pub skill_cards: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            flags: Vec::new(),
            skill_cards: 6,
        }
    }
}

/// Which particle fields are generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub background: bool,
    pub skills_crossing: bool,
    pub card_rails: bool,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            background: true,
            skills_crossing: true,
            card_rails: true,
        }
    }
}

impl FieldsConfig {
    /// Names of the enabled built-in fields
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.background {
            names.push("background");
        }
        if self.skills_crossing {
            names.push("skills-crossing");
        }
        if self.card_rails {
            names.push("card-rails");
        }
        names
    }
}

/// Stylesheet configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Bundled stylesheet name or file name in ~/.stardrift/themes/
    pub stylesheet: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            stylesheet: "default".to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub motion: MotionConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub fields: FieldsConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            log::info!("Config file not found, creating default at {:?}", config_path);
            Self::create_default_config()?;
        }

        let config = Self::load_from(&config_path)?;
        log::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Get the configuration directory path (~/.stardrift/ or $STARDRIFT_CONFIG_DIR)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file path (~/.stardrift/config.toml)
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Get the stylesheets directory path (~/.stardrift/themes/)
    pub fn themes_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(THEMES_DIR_NAME))
    }

    /// Create the default configuration file and directory structure
    pub fn create_default_config() -> Result<(), ConfigError> {
        let config_dir = Self::config_dir()?;
        let themes_dir = Self::themes_dir()?;
        let config_path = Self::config_file_path()?;

        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::CreateDirError(config_dir.clone(), e))?;
        fs::create_dir_all(&themes_dir)
            .map_err(|e| ConfigError::CreateDirError(themes_dir.clone(), e))?;

        let content = Self::default().to_toml_with_header()?;
        fs::write(&config_path, content)
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e))?;

        log::info!("Created default configuration at {:?}", config_path);
        Ok(())
    }

    /// Serialize with an explanatory header
    pub fn to_toml_with_header(&self) -> Result<String, ConfigError> {
        let toml_content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        Ok(format!(
            "# Stardrift Configuration\n\
             #\n\
             # The stylesheet can be a bundled name (default, calm, dense)\n\
             # or a filename in ~/.stardrift/themes/ without the .css extension\n\
             \n\
             {toml_content}"
        ))
    }

    /// Resize quiet period as a duration
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.motion.resize_debounce_ms)
    }

    /// Whether a body flag is set
    pub fn has_flag(&self, flag: &str) -> bool {
        self.page.flags.iter().any(|f| f == flag)
    }

    /// Get the path to a user stylesheet if it exists
    pub fn user_stylesheet_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        let sheet = Self::themes_dir()?.join(format!("{}.css", self.theme.stylesheet));
        Ok(sheet.exists().then_some(sheet))
    }

    /// Resolve and load the stylesheet CSS content
    ///
    /// Priority: user stylesheet (~/.stardrift/themes/) > bundled stylesheet
    pub fn resolve_stylesheet_css(&self) -> Result<String, ConfigError> {
        if let Some(path) = self.user_stylesheet_path()? {
            let css = fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            log::info!("Loaded user stylesheet from {:?}", path);
            return Ok(css);
        }

        if let Some(bundled) = themes::get_bundled_stylesheet(&self.theme.stylesheet) {
            log::info!("Using bundled stylesheet: {}", bundled.name);
            return Ok(bundled.css.to_string());
        }

        log::warn!(
            "Stylesheet '{}' not found, falling back to default",
            self.theme.stylesheet
        );
        Ok(themes::DEFAULT.css.to_string())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Home directory not found
    NoHomeDirectory,
    /// Failed to read config file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse config file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize config
    SerializeError(toml::ser::Error),
    /// Failed to write config file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
    /// Failed to set up file watcher
    WatchError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            ConfigError::CreateDirError(path, e) => write!(f, "Failed to create {:?}: {}", path, e),
            ConfigError::WatchError(e) => write!(f, "Failed to watch files: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.viewport.width, 1280.0);
        assert!(!config.motion.reduced);
        assert_eq!(config.resize_debounce(), Duration::from_millis(300));
        assert_eq!(config.motion.seed, None);
        assert_eq!(config.theme.stylesheet, "default");
        assert_eq!(
            config.fields.enabled(),
            vec!["background", "skills-crossing", "card-rails"]
        );
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut config = Config::default();
        config.motion.seed = Some(99);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.motion.seed, Some(99));
        assert_eq!(parsed.page.skill_cards, config.page.skill_cards);
    }

    #[test]
    fn test_partial_config() {
        let partial = r#"
            [motion]
            reduced = true

            [page]
            flags = ["show-skills-stars"]
        "#;
        let config: Config = toml::from_str(partial).unwrap();
        assert!(config.motion.reduced);
        assert!(config.has_flag("show-skills-stars"));
        // Other fields should have defaults
        assert_eq!(config.motion.resize_debounce_ms, 300);
        assert_eq!(config.viewport.width, 1280.0);
    }

    #[test]
    fn test_disabled_fields() {
        let config: Config = toml::from_str("[fields]\ncard_rails = false\n").unwrap();
        assert_eq!(config.fields.enabled(), vec!["background", "skills-crossing"]);
    }

    #[test]
    fn test_header_round_trips() {
        let content = Config::default().to_toml_with_header().unwrap();
        assert!(content.starts_with("# Stardrift Configuration"));
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.theme.stylesheet, "default");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport]\nwidth = 1920.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.viewport.width, 1920.0);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[viewport\nwidth = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(..)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/stardrift.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(..)));
    }
}
