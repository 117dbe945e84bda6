//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::grouping::{default_window_specs, WindowSpec};
use crate::render::DEFAULT_THEME;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CONVVIEW_CONFIG";

/// Environment variable overriding the highlight theme.
pub const THEME_ENV_VAR: &str = "CONVVIEW_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/convview/config.toml`:
///
/// ```toml
/// theme = "gruvbox-dark"
/// highlight = true
///
/// [[windows]]
/// label = "Today"
/// max_age_hours = 24
///
/// [[windows]]
/// label = "Older"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Theme name (e.g., "base16-ocean-dark", "solarized-dark").
    #[serde(default)]
    pub theme: Option<String>,

    /// Whether message bodies are syntax highlighted.
    #[serde(default)]
    pub highlight: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// History buckets, most recent first.
    #[serde(default)]
    pub windows: Option<Vec<WindowSpec>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Theme name.
    pub theme: String,
    /// Syntax highlighting on or off.
    pub highlight: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// History buckets, in evaluation order.
    pub windows: Vec<WindowSpec>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            highlight: true,
            log_file_path: default_log_path(),
            windows: default_window_specs(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/convview/convview.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("convview").join("convview.log")
    } else {
        PathBuf::from("convview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/convview/config.toml` on Linux, appropriate path on other
/// platforms, `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("convview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CONVVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/convview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        theme: config.theme.unwrap_or(defaults.theme),
        highlight: config.highlight.unwrap_or(defaults.highlight),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        windows: config.windows.unwrap_or(defaults.windows),
    }
}

/// Apply environment variable overrides (`CONVVIEW_THEME`).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(THEME_ENV_VAR) {
        config.theme = theme;
    }
    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user explicitly set are passed as `Some`.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    theme_override: Option<String>,
    highlight_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(theme) = theme_override {
        config.theme = theme;
    }
    if let Some(highlight) = highlight_override {
        config.highlight = highlight;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
