// src/error.rs
use thiserror::Error;

/// Errors raised while pricing a commodity contract.
///
/// Every variant carries enough context to tell the caller which input violated
/// which constraint; nothing is reported as a bare "an error occurred".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A market parameter is outside its admissible domain
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A simulation setting is unusable
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// An intermediate or final value left the real, finite domain
    #[error("Numerical domain error in {method}: {reason}")]
    NumericalDomain { method: String, reason: String },

    /// A result could not be encoded in the requested report format
    #[error("Failed to serialise report as {format}: {reason}")]
    Serialization { format: String, reason: String },
}

impl PricingError {
    /// True for errors detected while validating inputs, before any computation.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidParameters { .. } | PricingError::InvalidConfiguration { .. }
        )
    }

    /// True for errors raised because a computation would produce NaN, Inf or a
    /// non-positive price.
    pub fn is_numeric_domain_error(&self) -> bool {
        matches!(self, PricingError::NumericalDomain { .. })
    }
}

/// Result type alias for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, Result};

    /// Upper bound on the simulation ensemble width.
    pub const MAX_PATHS: usize = 10_000_000;

    /// Upper bound on the time discretisation.
    pub const MAX_STEPS: usize = 100_000;

    /// Upper bound on `(num_steps + 1) * num_paths` grid cells.
    pub const MAX_GRID_CELLS: usize = 200_000_000;

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> Result<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> Result<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> Result<()> {
        if paths == 0 {
            Err(PricingError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > MAX_PATHS {
            Err(PricingError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_PATHS),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> Result<()> {
        if steps == 0 {
            Err(PricingError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > MAX_STEPS {
            Err(PricingError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_STEPS),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a computed quantity is finite before it is returned
    pub fn validate_finite_result(method: &str, quantity: &str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NumericalDomain {
                method: method.to_string(),
                reason: format!("{} is not finite: {}", quantity, value),
            })
        }
    }
}
