//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration loading,
//! saving and validation.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// Zoom limits are inverted.
    #[error("Invalid zoom range: min {min} > max {max}")]
    InvalidZoomRange { min: f64, max: f64 },
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
