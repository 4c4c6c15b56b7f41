//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VOXIA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use voxia::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Search timeout: {}s", config.search.timeout_secs);
//! ```

mod documents;
mod error;
mod logging;
mod search;
mod storage;

pub use documents::DocumentsConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use search::SearchConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::time::Duration;

use crate::application::booking::FlowSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// console setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Search limits and provider timeout
    #[serde(default)]
    pub search: SearchConfig,

    /// Travel request store
    #[serde(default)]
    pub storage: StorageConfig,

    /// Itinerary documents
    #[serde(default)]
    pub documents: DocumentsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VOXIA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VOXIA__SEARCH__TIMEOUT_SECS=20` -> `search.timeout_secs = 20`
    /// - `VOXIA__DOCUMENTS__BASE_URL=...` -> `documents.base_url = ...`
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
                    .prefix("VOXIA")
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
        self.search.validate()?;
        self.storage.validate()?;
        self.documents.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Timeouts for the calls the flow controller makes itself.
    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            persistence_timeout: Duration::from_secs(self.storage.timeout_secs),
            document_timeout: Duration::from_secs(self.documents.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "VOXIA__SEARCH__TIMEOUT_SECS",
        "VOXIA__SEARCH__MAX_OFFERS",
        "VOXIA__SEARCH__DISPLAY_CURRENCY",
        "VOXIA__STORAGE__DATA_DIR",
        "VOXIA__DOCUMENTS__BASE_URL",
        "VOXIA__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.search.max_offers, 3);
        assert_eq!(config.search.timeout_secs, 20);
        assert_eq!(config.search.settlement_currency, "MYR");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("VOXIA__SEARCH__TIMEOUT_SECS", "5");
        env::set_var("VOXIA__SEARCH__DISPLAY_CURRENCY", "USD");
        env::set_var("VOXIA__STORAGE__DATA_DIR", "/var/lib/voxia");
        env::set_var("VOXIA__DOCUMENTS__BASE_URL", "https://docs.example.com");
        env::set_var("VOXIA__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.search.timeout_secs, 5);
        assert_eq!(config.search.display_currency.as_deref(), Some("USD"));
        assert_eq!(config.storage.data_dir, std::path::PathBuf::from("/var/lib/voxia"));
        assert_eq!(config.documents.base_url, "https://docs.example.com");
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_bad_limit() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("VOXIA__SEARCH__MAX_OFFERS", "50");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLimit { field: "search.max_offers", .. })
        ));
    }

    #[test]
    fn test_flow_settings_from_timeouts() {
        let config = AppConfig::default();
        let settings = config.flow_settings();
        assert_eq!(settings.persistence_timeout, Duration::from_secs(10));
        assert_eq!(settings.document_timeout, Duration::from_secs(30));
    }
}
