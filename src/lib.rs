//! # commodity-pricer: Fair Value for Commodity Futures and Options
//!
//! Three independent estimates for a commodity contract from six market inputs:
//!
//! - **Cost of carry**: futures price `S·exp((r + u)T)`
//! - **Black-Scholes**: closed-form European call price
//! - **Monte Carlo**: mean terminal spot price from simulated GBM paths
//!
//! ## Quick Start
//!
//! ```rust
//! use commodity_pricer::{price_contract, MarketParameters, SimulationConfig};
//!
//! // $1.20 spot, 2% rate, 1% storage, 6 months, $1.25 strike, 25% vol
//! let market = MarketParameters::new(1.20, 0.02, 0.01, 0.5, 1.25, 0.25);
//!
//! // 1,000 paths of 252 steps, seed 42
//! let simulation = SimulationConfig::new(1_000, 252, Some(42));
//!
//! let result = price_contract(&market, &simulation).expect("valid inputs");
//! println!("Futures: {:.3}", result.futures_price);
//! println!("Call:    {:.3}", result.option_price);
//! println!("MC S_T:  {:.3}", result.simulated_terminal_price);
//! ```
//!
//! ## Reproducibility
//!
//! A seeded run produces a bit-identical price grid every time, in both sequential
//! and parallel execution. Runs without a seed draw from OS entropy.

// Module declarations
pub mod analytics;
pub mod config;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod params;
pub mod pricing;
pub mod rng;

// Re-export commonly used types for convenience
pub use analytics::{compute_futures_price, compute_option_price};
pub use error::{PricingError, Result};
pub use mc::{simulate, Execution, SimulationConfig, TerminalEstimate};
pub use params::MarketParameters;
pub use pricing::{price_contract, value_contract, PricingResult, Valuation};
