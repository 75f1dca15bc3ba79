//! Cost-of-carry futures pricing
//!
//! ```text
//! F = S * exp((r + u) * T)
//! ```
//!
//! where `r` is the risk-free rate and `u` the storage cost, both continuously
//! compounded. No convenience yield is modelled.

use crate::error::validation::{validate_finite, validate_finite_result, validate_positive};
use crate::error::Result;
use crate::params::MarketParameters;
use tracing::debug;

/// Fair futures price for delivery at `time_to_maturity`.
///
/// # Errors
///
/// `InvalidParameters` when spot or maturity is non-positive or a rate is non-finite;
/// `NumericalDomain` when the carry factor overflows. Strike and volatility are
/// not inputs here and are not checked.
pub fn compute_futures_price(params: &MarketParameters) -> Result<f64> {
    validate_positive("spot_price", params.spot_price)?;
    validate_finite("risk_free_rate", params.risk_free_rate)?;
    validate_finite("storage_cost", params.storage_cost)?;
    validate_positive("time_to_maturity", params.time_to_maturity)?;
    let carry_factor = (params.carry_rate() * params.time_to_maturity).exp();
    let futures_price = params.spot_price * carry_factor;
    debug!(carry_factor, futures_price, "cost of carry");
    validate_finite_result("cost of carry", "futures price", futures_price)
}
