//! Monte Carlo path simulation under geometric Brownian motion.

pub mod config;
pub mod price_grid;
pub mod simulator;

pub use config::{Execution, SimulationConfig};
pub use price_grid::{PriceGrid, TerminalEstimate};
pub use simulator::{simulate, simulate_grid, simulate_grid_with, simulate_terminal};
