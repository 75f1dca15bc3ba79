// src/mc/simulator.rs
//! Monte Carlo simulation of the terminal commodity price under GBM
//!
//! # Algorithm
//!
//! ```text
//! dt = T / N
//! S[0][p] = S_0                                          for every path p
//! S[k][p] = S[k-1][p] * exp((r - σ²/2) dt + σ √dt Z[k][p]),   k = 1..=N
//! estimate = mean_p S[N][p]
//! ```
//!
//! # Ordering
//!
//! All paths advance one step before any path advances the next. Step `k`
//! draws `num_paths` normals from the single stream, in path order, and
//! `Z[k][p]` always feeds path `p`. Fixing the seed fixes the whole grid.
//!
//! Parallel execution splits only the per-step update across threads; draws are
//! still taken sequentially from the stream, and the terminal reduction runs
//! after the last step completes.

use super::config::{Execution, SimulationConfig};
use super::price_grid::{PriceGrid, TerminalEstimate};
use crate::error::Result;
use crate::math_utils::Timer;
use crate::models::gbm::Gbm;
use crate::params::MarketParameters;
use crate::rng::{NormalSampler, NormalSource};
use ndarray::{aview1, Zip};
use tracing::{debug, info, warn};

/// Monte Carlo estimate of the expected terminal price.
///
/// # Errors
///
/// Configuration errors for invalid `params`/`config` are returned before any
/// allocation; a non-finite or non-positive simulated price is a `NumericalDomain` error.
pub fn simulate(params: &MarketParameters, config: &SimulationConfig) -> Result<f64> {
    Ok(simulate_terminal(params, config)?.mean)
}

/// Terminal mean together with its standard error and range.
pub fn simulate_terminal(
    params: &MarketParameters,
    config: &SimulationConfig,
) -> Result<TerminalEstimate> {
    let mut timer = Timer::new();
    timer.start();

    let grid = simulate_grid(params, config)?;
    let estimate = grid.terminal_estimate();

    info!(
        num_paths = estimate.num_paths,
        num_steps = estimate.num_steps,
        seed = ?config.random_seed,
        execution = ?config.execution,
        mean = estimate.mean,
        std_error = estimate.std_error,
        elapsed_ms = timer.elapsed_ms(),
        "monte carlo simulation complete"
    );
    Ok(estimate)
}

/// Full price grid, seeded from `config.random_seed`.
pub fn simulate_grid(params: &MarketParameters, config: &SimulationConfig) -> Result<PriceGrid> {
    validate_inputs(params, config)?;
    if config.random_seed.is_none() {
        warn!("no random seed configured; simulation is not reproducible");
    }
    let mut sampler = NormalSampler::new(config.random_seed);
    propagate(params, config, &mut sampler)
}

/// Full price grid driven by a caller-supplied normal stream.
///
/// `config.random_seed` is ignored; the stream's own state decides the draws.
pub fn simulate_grid_with<S: NormalSource>(
    params: &MarketParameters,
    config: &SimulationConfig,
    source: &mut S,
) -> Result<PriceGrid> {
    validate_inputs(params, config)?;
    propagate(params, config, source)
}

fn validate_inputs(params: &MarketParameters, config: &SimulationConfig) -> Result<()> {
    config.validate()?;
    params.validate()?;
    config.time_step(params.time_to_maturity)?;
    Ok(())
}

fn propagate<S: NormalSource>(
    params: &MarketParameters,
    config: &SimulationConfig,
    source: &mut S,
) -> Result<PriceGrid> {
    let gbm = Gbm::risk_neutral(params, config.num_steps);
    debug!(
        dt = gbm.dt,
        drift_per_step = gbm.drift_per_step(),
        "gbm discretisation"
    );

    let mut grid = PriceGrid::new(config.num_steps, config.num_paths, params.spot_price);
    let mut z = vec![0.0; config.num_paths];

    for time_step in 1..=config.num_steps {
        source.fill_standard_normal(&mut z);
        let (prev, mut next) = grid.step_rows_mut(time_step);
        let zip = Zip::from(&mut next).and(&prev).and(aview1(&z));
        match config.execution {
            Execution::Sequential => {
                zip.for_each(|s_next, &s_prev, &dz| *s_next = gbm.step(s_prev, dz))
            }
            Execution::Parallel => {
                zip.par_for_each(|s_next, &s_prev, &dz| *s_next = gbm.step(s_prev, dz))
            }
        }
    }

    grid.check_positive()?;
    Ok(grid)
}
