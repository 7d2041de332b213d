//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-annotator.toml` in current directory
//! 4. `~/.config/sql-annotator/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [plan]
//! key_width = 20
//! rows_warn_threshold = 1000
//! rows_bad_threshold = 10000
//!
//! [output]
//! colored = true
//!
//! [theme]
//! sql-keyword = "#c678dd"
//! plan-type-bad = "#e06c75"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `NO_COLOR` | Disable colored terminal output when set |

use std::{collections::HashMap, env, fs, path::PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub plan:   PlanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Color overrides (class name -> CSS color)
    #[serde(default)]
    pub theme:  HashMap<String, String>
}

/// Plan report configuration
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Minimum width of the column-name field
    pub key_width:           usize,
    /// `rows` above this is a warning
    pub rows_warn_threshold: u64,
    /// `rows` above this is bad
    pub rows_bad_threshold:  u64
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            key_width:           20,
            rows_warn_threshold: 1000,
            rows_bad_threshold:  10000
        }
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub colored: bool
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            colored: true
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-annotator.toml)
    /// 3. Config file in home directory (~/.config/sql-annotator/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-annotator")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config overrides home config
        let local_config = PathBuf::from(".sql-annotator.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.output.colored = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a single config file
    pub fn from_file(path: &PathBuf) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject threshold pairs that cannot be ordered
    pub fn validate(&self) -> AppResult<()> {
        if self.plan.rows_warn_threshold > self.plan.rows_bad_threshold {
            return Err(config_error(format!(
                "plan.rows_warn_threshold ({}) must not exceed plan.rows_bad_threshold ({})",
                self.plan.rows_warn_threshold, self.plan.rows_bad_threshold
            )));
        }
        Ok(())
    }
}
