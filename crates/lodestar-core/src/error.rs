//! Error types for lodestar-core

use thiserror::Error;

/// Result type alias using lodestar-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Lodestar
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// Extension manifest could not be interpreted
    #[error("Invalid extension manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },

    /// Devfile could not be written back
    #[error("Failed to update devfile {path}: {message}")]
    DevfileUpdate { path: String, message: String },

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a devfile update error
    pub fn devfile_update(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DevfileUpdate {
            path: path.into(),
            message: message.into(),
        }
    }
}
