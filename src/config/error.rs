//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid time of day for {field}: {value} (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    #[error("Opening time {opening} is not before closing time {closing}")]
    OpeningNotBeforeClosing { opening: String, closing: String },

    #[error("No working days configured")]
    NoWorkingDays,

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Invalid log level filter: {0}")]
    InvalidLogLevel(String),
}
