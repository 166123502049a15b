//! Configuration errors

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CONFIG_READ_ERROR",
            ConfigError::Parse { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidOverride { .. } => "CONFIG_OVERRIDE_ERROR",
        }
    }
}
