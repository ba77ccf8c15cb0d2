//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use std::path::Path;

use super::{Config, APP_NAME, ENV_AUTO_UPDATE, ENV_CACHE_DIR, ENV_THEMES_DIR};

/// Quote a value as a TOML basic string
fn toml_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Windows paths carry backslashes
fn toml_path(path: &Path) -> String {
    toml_string(&path.display().to_string())
}

impl Config {
    /// Serialize configuration to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# {APP_NAME} configuration
# Regenerates VS Code color themes from the wallust palette.
#
# Precedence: environment variables > this file > built-in defaults.
# Regenerate this file with `{APP_NAME} config --reset`.

# ─────────────────────────────────────────────────────────────────────────────
# AUTO UPDATE
# ─────────────────────────────────────────────────────────────────────────────
# Watch the wallust cache and regenerate themes when the palette changes.
# The running daemon picks up edits to this flag without a restart.
# Env override: {ENV_AUTO_UPDATE}=true|false
auto_update = {auto_update}

# Milliseconds to wait after daemon start before the first generation
startup_delay_ms = {startup_delay_ms}

# Quiet window in milliseconds; a burst of file changes yields one generation
debounce_ms = {debounce_ms}

# ─────────────────────────────────────────────────────────────────────────────
# PATHS
# ─────────────────────────────────────────────────────────────────────────────
# Where wallust writes `colors` and `colors.json`
# Env override: {ENV_CACHE_DIR}
cache_dir = {cache_dir}

# Where wallust.json and wallust-bordered.json are written
# Env override: {ENV_THEMES_DIR}
themes_dir = {themes_dir}

# ─────────────────────────────────────────────────────────────────────────────
# LOGGING
# ─────────────────────────────────────────────────────────────────────────────
# RUST_LOG takes precedence over `level` when set.

[logging]
level = {log_level}                  # trace, debug, info, warn, error
file_enabled = {log_file_enabled}           # also write JSON logs to file_dir
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"       # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            auto_update = self.auto_update,
            startup_delay_ms = self.startup_delay_ms,
            debounce_ms = self.debounce_ms,
            cache_dir = toml_path(&self.cache_dir),
            themes_dir = toml_path(&self.themes_dir),
            log_level = toml_string(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_string(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
