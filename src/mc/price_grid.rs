// src/mc/price_grid.rs
//! Time × path matrix of simulated prices.

use crate::error::{PricingError, Result};
use crate::math_utils::mean_and_std_error;
use ndarray::{s, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use serde::Serialize;

/// Simulated prices indexed `[time_step][path_index]`.
///
/// Row 0 holds the spot price for every path; row `k` holds prices after `k`
/// propagation steps. Rows are contiguous, so advancing a whole step touches
/// one cache-friendly slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    prices: Array2<f64>,
}

/// Reduction of the terminal row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerminalEstimate {
    /// Monte Carlo estimate of the expected terminal price
    pub mean: f64,
    /// Standard error of `mean`; zero for a single path
    pub std_error: f64,
    pub min: f64,
    pub max: f64,
    pub num_paths: usize,
    pub num_steps: usize,
}

impl PriceGrid {
    /// Grid with `num_steps` propagation rows after the spot row.
    pub fn new(num_steps: usize, num_paths: usize, spot_price: f64) -> Self {
        let mut prices = Array2::zeros((num_steps + 1, num_paths));
        prices.row_mut(0).fill(spot_price);
        PriceGrid { prices }
    }

    /// Number of propagation steps (rows minus the spot row).
    pub fn num_steps(&self) -> usize {
        self.prices.nrows() - 1
    }

    pub fn num_paths(&self) -> usize {
        self.prices.ncols()
    }

    pub fn get(&self, time_step: usize, path_index: usize) -> Option<f64> {
        self.prices.get((time_step, path_index)).copied()
    }

    pub fn row(&self, time_step: usize) -> ArrayView1<'_, f64> {
        self.prices.row(time_step)
    }

    /// Prices of one path across all time steps.
    pub fn path(&self, path_index: usize) -> ArrayView1<'_, f64> {
        self.prices.column(path_index)
    }

    pub fn terminal_row(&self) -> ArrayView1<'_, f64> {
        self.prices.row(self.prices.nrows() - 1)
    }

    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.prices.view()
    }

    /// Previous row (read) and current row (write) for step `time_step >= 1`.
    pub(crate) fn step_rows_mut(
        &mut self,
        time_step: usize,
    ) -> (ArrayViewMut1<'_, f64>, ArrayViewMut1<'_, f64>) {
        self.prices
            .multi_slice_mut((s![time_step - 1, ..], s![time_step, ..]))
    }

    /// Arithmetic mean of the terminal row.
    pub fn terminal_mean(&self) -> f64 {
        self.terminal_estimate().mean
    }

    /// Mean, standard error and range of the terminal row, summed in path order.
    pub fn terminal_estimate(&self) -> TerminalEstimate {
        let terminal = self.terminal_row().to_vec();
        let (mean, std_error) = mean_and_std_error(&terminal);
        let (min, max) = terminal
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });
        TerminalEstimate {
            mean,
            std_error,
            min,
            max,
            num_paths: self.num_paths(),
            num_steps: self.num_steps(),
        }
    }

    /// Every simulated price must be finite and strictly positive.
    pub fn check_positive(&self) -> Result<()> {
        for ((time_step, path_index), &price) in self.prices.indexed_iter() {
            if !(price.is_finite() && price > 0.0) {
                return Err(PricingError::NumericalDomain {
                    method: "Monte Carlo path simulation".to_string(),
                    reason: format!(
                        "price at step {} on path {} is {}; simulated prices must be finite and positive",
                        time_step, path_index, price
                    ),
                });
            }
        }
        Ok(())
    }
}
