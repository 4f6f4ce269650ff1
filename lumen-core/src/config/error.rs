//! Configuration error types

use thiserror::Error;

/// Errors raised while resolving settings from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{var}': {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid URL in '{var}': {message}")]
    InvalidUrl { var: String, message: String },
}

impl ConfigError {
    /// Helper to create an invalid value error
    pub fn invalid_value(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            var: var.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
