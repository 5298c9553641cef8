//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Upstream API settings
    pub api: ApiConfig,
    /// Monitoring settings
    pub monitor: MonitorConfig,
    /// State store settings
    pub store: StoreConfig,
}

impl Config {
    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "monitor.interval_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.monitor.threshold_units < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "monitor.threshold_units".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.api.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the loopback uploader
    pub base_url: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds
    pub read_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:17580".to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 10,
        }
    }
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Check interval in seconds
    pub interval_seconds: u64,
    /// Sleep after a Retry outcome before the next attempt, in seconds
    pub retry_interval_seconds: u64,
    /// Minimum dose that triggers an alert, in insulin units
    pub threshold_units: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            retry_interval_seconds: 60,
            threshold_units: 2.0,
        }
    }
}

/// State store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Override for the state file path
    pub path: Option<PathBuf>,
}
