//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WRITING_SESSION` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a runnable setup.
//!
//! # Example
//!
//! ```no_run
//! use writing_session::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod experiment;
mod export;
mod server;

pub use error::{ConfigError, ValidationError};
pub use experiment::{ExperimentConfig, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
pub use export::ExportConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Protocol switches (timer start policy, editing gate, cohort requirement)
    #[serde(default)]
    pub experiment: ExperimentConfig,

    /// Export sink selection
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WRITING_SESSION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WRITING_SESSION__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WRITING_SESSION__EXPERIMENT__AUTO_START_TIMERS=false`
    /// - `WRITING_SESSION__EXPORT__FORMAT=json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WRITING_SESSION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.experiment.validate()?;
        self.export.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SheetFormat;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "WRITING_SESSION__SERVER__PORT",
        "WRITING_SESSION__SERVER__ENVIRONMENT",
        "WRITING_SESSION__EXPERIMENT__AUTO_START_TIMERS",
        "WRITING_SESSION__EXPERIMENT__REQUIRE_COHORT",
        "WRITING_SESSION__EXPERIMENT__TICK_INTERVAL_MS",
        "WRITING_SESSION__EXPORT__FORMAT",
        "WRITING_SESSION__EXPORT__UTC_OFFSET_MINUTES",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.experiment.auto_start_timers);
        assert_eq!(config.experiment.tick_interval_ms, 1000);
        assert_eq!(config.export.format, SheetFormat::Xlsx);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("WRITING_SESSION__SERVER__PORT", "3000");
        env::set_var("WRITING_SESSION__SERVER__ENVIRONMENT", "production");
        env::set_var("WRITING_SESSION__EXPERIMENT__AUTO_START_TIMERS", "false");
        env::set_var("WRITING_SESSION__EXPERIMENT__REQUIRE_COHORT", "false");
        env::set_var("WRITING_SESSION__EXPORT__FORMAT", "json");
        env::set_var("WRITING_SESSION__EXPORT__UTC_OFFSET_MINUTES", "540");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(!config.experiment.auto_start_timers);
        assert!(!config.experiment.require_cohort);
        assert!(config.experiment.timer_gated_editing);
        assert_eq!(config.export.format, SheetFormat::Json);
        assert_eq!(config.export.utc_offset_minutes, Some(540));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_tick_interval_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("WRITING_SESSION__EXPERIMENT__TICK_INTERVAL_MS", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTickInterval { actual: 10, .. })
        ));
    }
}
