//! `[logging]` section: diagnostic level and the optional JSON log file
//!
//! User notices (missing palette, failed writes) always reach the terminal;
//! these settings only shape the tracing output around them.

use serde::Deserialize;
use std::path::PathBuf;

use super::APP_NAME;

/// How often the JSON log file starts a new file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file that grows forever
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Case-insensitive; anything unrecognized rotates daily.
impl From<&str> for LogRotation {
    fn from(value: &str) -> Self {
        [Self::Hourly, Self::Never]
            .into_iter()
            .find(|r| value.eq_ignore_ascii_case(r.as_str()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level for this crate's targets when RUST_LOG is unset
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File names are `<prefix>.<date>` (hourly adds the hour)
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: default_log_dir(),
            file_rotation: LogRotation::Daily,
            file_prefix: APP_NAME.to_string(),
        }
    }
}

/// Platform data dir, e.g. ~/.local/share/wallust-themes/logs
fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|data| data.join(APP_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// `[logging]` as written in config.toml; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl FileLogging {
    /// Fill the keys the file left out from the defaults
    pub fn resolve(self) -> LoggingConfig {
        let defaults = LoggingConfig::default();

        LoggingConfig {
            level: self.level.unwrap_or(defaults.level),
            file_enabled: self.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: self.file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_rotation: self
                .file_rotation
                .as_deref()
                .map(LogRotation::from)
                .unwrap_or(defaults.file_rotation),
            file_prefix: self.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}
