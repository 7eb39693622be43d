//! Error types for configuration construction and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Invalid config version.
    #[error("unsupported config version: {version}")]
    UnsupportedVersion {
        /// Version string from the config.
        version: String,
    },

    /// Color space not found in config.
    #[error("color space not found: {name}")]
    ColorSpaceNotFound {
        /// Name of the missing color space.
        name: String,
    },

    /// Display not found in config.
    #[error("display not found: {name}")]
    DisplayNotFound {
        /// Name of the missing display.
        name: String,
    },

    /// Invalid transform definition.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Description of what's wrong.
        reason: String,
    },

    /// General validation error.
    #[error("validation error: {0}")]
    Validation(String),
}
