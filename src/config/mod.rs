//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `BREWLINE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use brewline::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let calendar = config.schedule.default_calendar().expect("Invalid schedule");
//! println!("{} working hours per week", calendar.weekly_working_hours());
//! ```

mod error;
mod logging;
mod schedule;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use schedule::ScheduleConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Default work week, used when no active calendar exists yet
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BREWLINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BREWLINE__SCHEDULE__OPENING_TIME=08:00` -> `schedule.opening_time = "08:00"`
    /// - `BREWLINE__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BREWLINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Like [`AppConfig::load`], then runs [`AppConfig::validate`].
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for unparsable times, opening not before
    /// closing, an empty working-day set or a malformed log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.schedule.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
