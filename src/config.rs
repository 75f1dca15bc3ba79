//! Run configuration
//!
//! Loads market data, simulation settings and report options from a TOML file.
//! Every section is optional; missing values fall back to the reference coffee
//! contract.
//!
//! ```toml
//! log_level = "info"
//!
//! [market]
//! spot_price = 1.20
//! risk_free_rate = 0.02
//! storage_cost = 0.01
//! time_to_maturity = 0.5
//! strike_price = 1.25
//! volatility = 0.25
//!
//! [simulation]
//! num_paths = 1000
//! num_steps = 252
//! random_seed = 42
//! execution = "sequential"
//!
//! [report]
//! format = "text"
//! currency = "$"
//! decimals = 3
//! ```

use crate::error::PricingError;
use crate::mc::SimulationConfig;
use crate::output::ReportConfig;
use crate::params::MarketParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error(transparent)]
    Invalid(#[from] PricingError),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub market: MarketParameters,
    pub simulation: SimulationConfig,
    pub report: ReportConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            log_level: "warn".to_string(),
            market: MarketParameters::default(),
            simulation: SimulationConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check every section, failing on the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        self.market.validate_for_analytic()?;
        self.simulation.validate()?;
        self.report.validate()?;
        Ok(())
    }
}
