//! Application configuration.
//!
//! Settings are read from `<config_dir>/hangman/config.toml` and may be
//! overridden by `HANGMAN_*` environment variables. Missing keys fall back to
//! the defaults below.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Difficulty;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "hangman";
/// Prefix for environment overrides, e.g. `HANGMAN_RESULT_PAUSE_MS`.
pub const ENV_PREFIX: &str = "HANGMAN";

const DEFAULT_CONFIG: &str = r#"# Hangman configuration.
# Every key is optional. HANGMAN_<KEY> environment variables take precedence.

# Difficulty preselected in the menu: "basic" or "intermediate".
# default_difficulty = "basic"

# Pause after a guess result is shown, in milliseconds.
result_pause_ms = 1000

# How often the terminal is polled for input and the turn timer checked.
tick_rate_ms = 250

# Log verbosity (tracing filter syntax). HANGMAN_LOG overrides it at runtime.
log_filter = "info"

# Directory receiving hangman.log.
# log_dir = "/var/tmp/hangman"
"#;

/// Runtime settings for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Difficulty highlighted when the menu opens.
    pub default_difficulty: Option<Difficulty>,
    /// Pause after a guess result, in milliseconds.
    pub result_pause_ms: u64,
    /// Input poll interval, in milliseconds.
    pub tick_rate_ms: u64,
    /// Directory receiving the log file.
    pub log_dir: PathBuf,
    /// Default tracing filter directive.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_difficulty: None,
            result_pause_ms: 1000,
            tick_rate_ms: 250,
            log_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR)
                .join("logs"),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (optional) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Pause after a guess result.
    pub fn result_pause(&self) -> Duration {
        Duration::from_millis(self.result_pause_ms)
    }

    /// Input poll interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            bail!("tick_rate_ms must be greater than zero");
        }
        if self.log_filter.trim().is_empty() {
            bail!("log_filter must not be empty");
        }
        Ok(())
    }
}

/// Path of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default config if the user has none yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the commented default config to `path` unless a file already exists there.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}
