//! Application configuration loading and validation.
//!
//! Every section is optional; a missing file section falls back to defaults.
//! Command-line flags are merged on top by the CLI before [`Config::validate`]
//! runs again.
//!
//! # Example
//!
//! ```no_run
//! use ore_optimize::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("ore.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::logging::LoggingConfig;
use super::optimizer::OptimizerConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Allocator settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        let optimizer = &self.optimizer;
        if !(0.0..1.0).contains(&optimizer.protocol_fee) {
            return Err(ConfigError::InvalidValue {
                field: "protocol_fee",
                reason: "must be in [0, 1)".to_string(),
            }
            .into());
        }
        if !optimizer.unit.is_finite() || optimizer.unit <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "unit",
                reason: "must be a finite number greater than 0".to_string(),
            }
            .into());
        }
        if let Some(budget) = optimizer.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "budget",
                    reason: "must be a finite number of at least 0".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Budget to allocate, which must be set in the file or on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when no budget was given.
    pub fn budget(&self) -> Result<f64> {
        self.optimizer
            .budget
            .ok_or_else(|| ConfigError::MissingField { field: "budget" }.into())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
