// src/models/gbm.rs
//! Risk-neutral geometric Brownian motion
//!
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! Stepped in log space, so every propagated price stays strictly positive:
//! ```text
//! S_{t+dt} = S_t * exp((r - σ²/2) dt + σ √dt Z),   Z ~ N(0,1)
//! ```

use crate::params::MarketParameters;

/// GBM discretised on a uniform grid of width `dt`.
///
/// The per-step drift and diffusion scale are computed once, so every path
/// and every step applies the exact same floating-point expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub mu: f64,
    pub sigma: f64,
    pub dt: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl Gbm {
    pub fn new(mu: f64, sigma: f64, dt: f64) -> Self {
        Gbm {
            mu,
            sigma,
            dt,
            drift_dt: (mu - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        }
    }

    /// Risk-neutral dynamics for `params` with `num_steps` steps to maturity.
    pub fn risk_neutral(params: &MarketParameters, num_steps: usize) -> Self {
        let dt = params.time_to_maturity / num_steps as f64;
        Gbm::new(params.risk_free_rate, params.volatility, dt)
    }

    /// Itô-corrected log drift per step, `(μ - σ²/2) dt`.
    pub fn drift_per_step(&self) -> f64 {
        self.drift_dt
    }

    /// Log-price increment for one normal draw.
    #[inline]
    pub fn log_increment(&self, normal_draw: f64) -> f64 {
        self.drift_dt + self.vol_sqrt_dt * normal_draw
    }

    #[inline]
    pub fn step(&self, s_t: f64, normal_draw: f64) -> f64 {
        s_t * self.log_increment(normal_draw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_risk_neutral_dt() {
        let gbm = Gbm::risk_neutral(&MarketParameters::default(), 252);
        assert_relative_eq!(gbm.dt, 0.5 / 252.0);
        assert_eq!(gbm.mu, 0.02);
        assert_eq!(gbm.sigma, 0.25);
    }

    #[test]
    fn test_zero_draw_applies_drift_only() {
        let gbm = Gbm::new(0.05, 0.2, 0.1);
        let expected = 100.0 * ((0.05 - 0.02) * 0.1f64).exp();
        assert_relative_eq!(gbm.step(100.0, 0.0), expected, max_relative = 1e-15);
    }

    #[test]
    fn test_step_stays_positive_for_extreme_draws() {
        let gbm = Gbm::new(0.02, 0.9, 1.0);
        assert!(gbm.step(1.0, -8.0) > 0.0);
        assert!(gbm.step(1.0, 8.0).is_finite());
    }
}
