// src/params.rs
//! Market inputs shared by every pricing method.

use crate::error::{validation::*, Result};
use serde::{Deserialize, Serialize};

/// Immutable market data for one pricing run.
///
/// Rates are continuously compounded and annualised; `time_to_maturity` is in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParameters {
    pub spot_price: f64,
    pub risk_free_rate: f64,
    pub storage_cost: f64,
    pub time_to_maturity: f64,
    pub strike_price: f64,
    pub volatility: f64,
}

impl MarketParameters {
    pub fn new(
        spot_price: f64,
        risk_free_rate: f64,
        storage_cost: f64,
        time_to_maturity: f64,
        strike_price: f64,
        volatility: f64,
    ) -> Self {
        MarketParameters {
            spot_price,
            risk_free_rate,
            storage_cost,
            time_to_maturity,
            strike_price,
            volatility,
        }
    }

    /// Validate the parameters shared by all three methods.
    ///
    /// Zero volatility passes here: the simulator degenerates to a deterministic path.
    pub fn validate(&self) -> Result<()> {
        validate_positive("spot_price", self.spot_price)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_finite("storage_cost", self.storage_cost)?;
        validate_positive("time_to_maturity", self.time_to_maturity)?;
        validate_positive("strike_price", self.strike_price)?;
        validate_non_negative("volatility", self.volatility)?;
        Ok(())
    }

    /// Stricter check for the closed-form price, which divides by `σ√T`.
    pub fn validate_for_analytic(&self) -> Result<()> {
        self.validate()?;
        validate_positive("volatility", self.volatility)
    }

    /// Net cost of carry `r + u`.
    pub fn carry_rate(&self) -> f64 {
        self.risk_free_rate + self.storage_cost
    }
}

impl Default for MarketParameters {
    /// Arabica coffee contract used as the reference scenario: $1.20/lb spot,
    /// 2% rate, 1% storage, six months, $1.25 strike, 25% volatility.
    fn default() -> Self {
        MarketParameters {
            spot_price: 1.20,
            risk_free_rate: 0.02,
            storage_cost: 0.01,
            time_to_maturity: 0.5,
            strike_price: 1.25,
            volatility: 0.25,
        }
    }
}
