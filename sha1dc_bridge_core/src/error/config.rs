//! Configuration error types

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Provider merge or extraction failed
    #[error("Failed to load configuration: {0}")]
    Extract(#[from] figment::Error),

    /// A value was well-formed but unusable
    #[error("Invalid configuration value '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(key: &str, reason: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
