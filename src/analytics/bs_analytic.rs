//! Analytical Black-Scholes formulas for the European call
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! C = e^(-rT) * E^Q[max(S_T - K, 0)]
//! ```
//!
//! which has a closed-form solution involving the cumulative normal Φ(x).
//!
//! # Drift term in d₁
//!
//! Older worksheets for the coffee contract computed
//! `d₁ = [ln(S/K) + (r + T·σ²)T] / (σ√T)`. That drift term is wrong; the
//! risk-neutral form is `r + σ²/2`. Both give the same number when `T = 0.5`,
//! which is why the error went unnoticed on the reference contract.
//! [`d1_legacy_drift`] keeps the old expression so the discrepancy stays pinned
//! by tests; pricing never uses it.

use crate::error::{validation::validate_finite_result, Result};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::params::MarketParameters;
use tracing::debug;

/// Standardised moneyness terms `(d₁, d₂)`
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
pub fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// `d₁` with the `T·σ²` drift term from the legacy worksheet. Incorrect; see module docs.
pub fn d1_legacy_drift(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    ((s / k).ln() + (r + t * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// No validation: callers must ensure `s, k, sigma, t > 0`.
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    call_from_moneyness(s, k, r, t, d1, d2)
}

fn call_from_moneyness(s: f64, k: f64, r: f64, t: f64, d1: f64, d2: f64) -> f64 {
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes Vega (∂C/∂σ) for the European call
///
/// ```text
/// ν = S * φ(d₁) * √T
/// ```
///
/// Strictly positive for valid inputs, so the call price increases with volatility.
pub fn bs_call_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Closed-form price of a European call on the commodity spot.
///
/// Storage cost does not enter: the option is written on spot, discounted at `r`.
///
/// # Errors
///
/// `InvalidParameters` when spot, strike, maturity or volatility is non-positive;
/// `NumericalDomain` if `d₁`, `d₂` or the price come out non-finite.
pub fn compute_option_price(params: &MarketParameters) -> Result<f64> {
    params.validate_for_analytic()?;
    let MarketParameters {
        spot_price: s,
        strike_price: k,
        risk_free_rate: r,
        volatility: sigma,
        time_to_maturity: t,
        ..
    } = *params;

    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    validate_finite_result("Black-Scholes", "d1", d1)?;
    validate_finite_result("Black-Scholes", "d2", d2)?;
    debug!(d1, d2, "black-scholes moneyness");

    let price = call_from_moneyness(s, k, r, t, d1, d2);
    validate_finite_result("Black-Scholes", "call price", price)
}

/// Vega of the call described by `params`.
pub fn compute_option_vega(params: &MarketParameters) -> Result<f64> {
    params.validate_for_analytic()?;
    let vega = bs_call_vega(
        params.spot_price,
        params.strike_price,
        params.risk_free_rate,
        params.volatility,
        params.time_to_maturity,
    );
    validate_finite_result("Black-Scholes", "vega", vega)
}
