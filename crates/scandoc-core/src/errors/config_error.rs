//! Configuration errors.

use super::error_code::{self, ScandocErrorCode};

/// Errors that can occur while validating the resolution configuration.
/// These are fatal: a run never starts with a broken configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Resolution configuration is missing")]
    Missing,

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ScandocErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
