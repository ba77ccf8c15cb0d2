//! Configuration for the theme generator
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/wallust-themes/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name used for the config and data directories
pub const APP_NAME: &str = "wallust-themes";

pub const ENV_AUTO_UPDATE: &str = "WALLUST_THEMES_AUTO_UPDATE";
pub const ENV_CACHE_DIR: &str = "WALLUST_THEMES_CACHE_DIR";
pub const ENV_THEMES_DIR: &str = "WALLUST_THEMES_DIR";

const DEFAULT_STARTUP_DELAY_MS: u64 = 10_000;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Watch the wallust cache and regenerate on change
    pub auto_update: bool,

    /// Directory wallust writes `colors` and `colors.json` into
    pub cache_dir: PathBuf,

    /// Directory the generated theme files are written to
    pub themes_dir: PathBuf,

    /// Delay before the one-off generation at daemon startup
    pub startup_delay_ms: u64,

    /// Quiet window after a file change before regenerating
    pub debounce_ms: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_update: true,
            cache_dir: default_cache_dir(),
            themes_dir: default_themes_dir(),
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            logging: LoggingConfig::default(),
        }
    }
}

/// wallust writes to ~/.cache/wallust regardless of platform
fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".cache").join("wallust"))
        .unwrap_or_else(|| PathBuf::from(".cache/wallust"))
}

fn default_themes_dir() -> PathBuf {
    dirs::data_dir()
        .map(|data| data.join(APP_NAME).join("themes"))
        .unwrap_or_else(|| PathBuf::from("./themes"))
}

/// Settings as they appear in the config file; everything optional
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub auto_update: Option<bool>,
    pub cache_dir: Option<String>,
    pub themes_dir: Option<String>,
    pub startup_delay_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub logging: Option<FileLogging>,
}

impl Config {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/wallust-themes/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_NAME).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file. A missing file is an empty config.
    pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed:
    /// a broken config fails fast instead of silently falling back to
    /// defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file(&path) {
            Ok(config) => config,
            Err(ConfigError::Parse { path, source }) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", source);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Invalid boolean values (use true/false)");
                eprintln!("    - Typos in key or section names\n");
                eprintln!("  To reset, run `{APP_NAME} config --reset`.\n");
                std::process::exit(1);
            }
            Err(ConfigError::Read { path, source }) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", source);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Re-read a config file for a running daemon. Unlike `from_env`, a
    /// broken file is returned as an error instead of exiting.
    pub fn reload(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// The file's own values over the defaults, ignoring the environment.
    /// Used when rewriting the file so env overrides never get persisted.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        Ok(Self::from_sources(file, |_| None))
    }

    /// Merge a parsed file with environment lookups over the defaults
    pub fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Auto update: env > file > default
        let auto_update = env(ENV_AUTO_UPDATE)
            .and_then(|v| parse_bool(&v))
            .or(file.auto_update)
            .unwrap_or(defaults.auto_update);

        // Cache directory: env > file > default
        let cache_dir = env(ENV_CACHE_DIR)
            .or(file.cache_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        // Themes directory: env > file > default
        let themes_dir = env(ENV_THEMES_DIR)
            .or(file.themes_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.themes_dir);

        // Timings: file > default
        let startup_delay_ms = file.startup_delay_ms.unwrap_or(defaults.startup_delay_ms);
        let debounce_ms = file.debounce_ms.unwrap_or(defaults.debounce_ms);

        let logging = file.logging.unwrap_or_default().resolve();

        Self {
            auto_update,
            cache_dir,
            themes_dir,
            startup_delay_ms,
            debounce_ms,
            logging,
        }
    }
}

/// Accepts 1/0, true/false, yes/no, on/off. Anything else is ignored.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
