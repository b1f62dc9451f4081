//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DERMA_SCAN` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working setup.
//!
//! # Example
//!
//! ```no_run
//! use derma_scan::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Data directory: {}", config.storage.data_dir.display());
//! ```

mod error;
mod logging;
mod storage;
mod workflow;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use workflow::{QualityGateKind, WorkflowConfig};

use serde::Deserialize;

use crate::domain::diagnosis::ReferralPolicy;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Key-value store backend and location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated delays and capture quality gate
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Thresholds for routing a scan to a doctor
    #[serde(default)]
    pub referral: ReferralPolicy,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DERMA_SCAN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DERMA_SCAN__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    /// - `DERMA_SCAN__WORKFLOW__BLUR_FAILURE_RATE=0` -> `workflow.blur_failure_rate = 0`
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
                    .prefix("DERMA_SCAN")
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
        self.storage.validate()?;
        self.workflow.validate()?;
        self.referral
            .validate()
            .map_err(|e| ValidationError::InvalidReferralPolicy(e.to_string()))?;
        Ok(())
    }
}
