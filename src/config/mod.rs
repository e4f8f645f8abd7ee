//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{bail, Context, Result};
use clipsentry_core::PreviewLimits;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Watch-mode configuration
    pub watch: WatchConfig,
    /// Preview rendering configuration
    pub preview: PreviewConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Watch-mode (periodic status re-check) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Interval between status checks, in milliseconds
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

/// Preview rendering caps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Maximum preview length in characters
    pub max_chars: usize,
    /// Maximum file entries rendered for drop lists
    pub max_files: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_chars: clipsentry_core::preview::MAX_PREVIEW_CHARS,
            max_files: clipsentry_core::preview::MAX_FILE_ENTRIES,
        }
    }
}

/// Logging settings (overridable from the CLI)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: pretty, compact, json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.watch.interval_ms == 0 {
            bail!("watch.interval_ms must be nonzero");
        }
        if self.preview.max_chars == 0 {
            bail!("preview.max_chars must be nonzero");
        }
        if self.preview.max_files == 0 {
            bail!("preview.max_files must be nonzero");
        }
        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            other => bail!("logging.format must be pretty, compact or json (got '{other}')"),
        }
        Ok(())
    }

    /// Preview limits handed to the inspector
    pub fn preview_limits(&self) -> PreviewLimits {
        PreviewLimits {
            max_chars: self.preview.max_chars,
            max_files: self.preview.max_files,
        }
    }
}
