// src/pricing.rs
//! One-shot valuation of a commodity contract by all three methods.

use crate::analytics::{compute_futures_price, compute_option_price};
use crate::error::Result;
use crate::mc::{simulate_terminal, SimulationConfig, TerminalEstimate};
use crate::params::MarketParameters;
use serde::Serialize;
use tracing::info;

/// The three independent fair-value figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    /// Cost-of-carry futures price
    pub futures_price: f64,
    /// Black-Scholes European call price
    pub option_price: f64,
    /// Monte Carlo mean terminal spot price
    pub simulated_terminal_price: f64,
}

/// A `PricingResult` with the inputs and simulation statistics that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    pub market: MarketParameters,
    pub simulation: SimulationConfig,
    pub result: PricingResult,
    pub terminal: TerminalEstimate,
}

/// Price the contract by cost of carry, Black-Scholes and Monte Carlo.
///
/// Inputs are validated for all three methods before any of them runs, so the
/// call either yields every figure or reports the first violated precondition.
pub fn price_contract(
    params: &MarketParameters,
    config: &SimulationConfig,
) -> Result<PricingResult> {
    Ok(value_contract(params, config)?.result)
}

pub fn value_contract(params: &MarketParameters, config: &SimulationConfig) -> Result<Valuation> {
    params.validate_for_analytic()?;
    config.validate()?;
    config.time_step(params.time_to_maturity)?;

    let futures_price = compute_futures_price(params)?;
    let option_price = compute_option_price(params)?;
    let terminal = simulate_terminal(params, config)?;

    let result = PricingResult {
        futures_price,
        option_price,
        simulated_terminal_price: terminal.mean,
    };
    info!(
        futures_price,
        option_price,
        simulated_terminal_price = terminal.mean,
        "contract valued"
    );

    Ok(Valuation {
        market: *params,
        simulation: *config,
        result,
        terminal,
    })
}
