//! Unified error types for boluswatch
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the upstream API client
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error from the persisted state store
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (file operations, terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the upstream HTTP API
///
/// Every variant is a transient fetch failure from the monitor's point of
/// view: the check cycle maps all of them to a Retry outcome.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Request failed before a response arrived (connect error, timeout, DNS)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-200 status
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from the persisted state store
#[derive(Error, Debug)]
pub enum StoreError {
    /// State file could not be read or written
    #[error("state file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// State file exists but is not valid TOML
    #[error("corrupt state file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Could not serialize state for writing
    #[error("failed to encode state: {0}")]
    Encode(#[from] toml::ser::Error),

    /// No usable state directory on this system
    #[error("no writable state directory found")]
    NoStateDir,
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
