//! Closed-form pricing: cost-of-carry futures and the Black-Scholes call.

pub mod bs_analytic;
pub mod cost_of_carry;

pub use bs_analytic::compute_option_price;
pub use cost_of_carry::compute_futures_price;
