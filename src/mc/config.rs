// src/mc/config.rs
//! Monte Carlo simulation settings.

use crate::error::{validation::*, PricingError, Result};
use serde::{Deserialize, Serialize};

/// How each time step advances the path ensemble.
///
/// Both modes consume the normal stream in the same order and reduce the terminal
/// row the same way, so they produce bit-identical results for a given seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Sequential,
    /// Advance the paths of each step across the rayon pool.
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ensemble width
    pub num_paths: usize,
    /// Time discretisation; `dt = T / num_steps`
    pub num_steps: usize,
    /// `None` seeds from OS entropy and is not reproducible
    pub random_seed: Option<u64>,
    pub execution: Execution,
}

impl SimulationConfig {
    pub fn new(num_paths: usize, num_steps: usize, random_seed: Option<u64>) -> Self {
        SimulationConfig {
            num_paths,
            num_steps,
            random_seed,
            execution: Execution::Sequential,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Rows in the price grid: the spot row plus one per propagation step.
    pub fn grid_rows(&self) -> usize {
        self.num_steps + 1
    }

    /// Step size `dt = T / num_steps` for a contract maturing at `time_to_maturity`.
    ///
    /// A tiny maturity spread over many steps can underflow to zero, which would
    /// freeze every path at the spot price.
    pub fn time_step(&self, time_to_maturity: f64) -> Result<f64> {
        let dt = time_to_maturity / self.num_steps as f64;
        if dt > 0.0 && dt.is_finite() {
            Ok(dt)
        } else {
            Err(PricingError::InvalidConfiguration {
                field: "dt".to_string(),
                reason: format!(
                    "time_to_maturity {:e} over {} steps gives dt = {:e}, must be positive and finite",
                    time_to_maturity, self.num_steps, dt
                ),
            })
        }
    }

    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> Result<()> {
        validate_paths(self.num_paths)?;
        validate_steps(self.num_steps)?;

        let cells = self.grid_rows().checked_mul(self.num_paths);
        match cells {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => Err(PricingError::InvalidConfiguration {
                field: "num_paths x num_steps".to_string(),
                reason: format!(
                    "price grid of {} x {} exceeds {} cells",
                    self.grid_rows(),
                    self.num_paths,
                    MAX_GRID_CELLS
                ),
            }),
        }
    }
}

impl Default for SimulationConfig {
    /// 1,000 paths of daily steps over a trading year, seed 42.
    fn default() -> Self {
        SimulationConfig {
            num_paths: 1_000,
            num_steps: 252,
            random_seed: Some(42),
            execution: Execution::Sequential,
        }
    }
}
