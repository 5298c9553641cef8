//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use std::path::PathBuf;

use crate::config::{Config, ConfigFile};

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    pub fn with_file(mut self, path: Option<&str>) -> Self {
        let file_config = if let Some(path) = path {
            ConfigFile::load(path).ok()
        } else {
            ConfigFile::load_default()
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        self
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI base URL
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.config.api.base_url = url;
        }
        self
    }

    /// Override with CLI check interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.monitor.interval_seconds = i;
        }
        self
    }

    /// Override with CLI retry interval
    pub fn with_retry_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.monitor.retry_interval_seconds = i;
        }
        self
    }

    /// Override with CLI alert threshold
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(t) = threshold {
            self.config.monitor.threshold_units = t;
        }
        self
    }

    /// Override with CLI state file path
    pub fn with_state_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.config.store.path = Some(p);
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
