// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function Φ(x)
///
/// Written with `erfc` so the lower tail keeps full relative precision.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x)
pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

/// Arithmetic mean and standard error of the mean (`s / √n`, sample std with n−1).
///
/// Sums are taken as offsets from the first value, so a constant sample returns
/// that value and a standard error of exactly zero. A single observation also
/// reports a standard error of zero.
pub fn mean_and_std_error<'a, I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a f64>,
    I::IntoIter: Clone,
{
    let iter = values.into_iter();
    let first = match iter.clone().next() {
        Some(&v) => v,
        None => return (f64::NAN, f64::NAN),
    };
    let (count, offset_sum) = iter
        .clone()
        .fold((0usize, 0.0), |(n, s), &v| (n + 1, s + (v - first)));
    let n = count as f64;
    let mean_offset = offset_sum / n;
    let mean = first + mean_offset;
    if count == 1 {
        return (mean, 0.0);
    }
    let sum_sq_dev: f64 = iter
        .map(|&v| {
            let dev = (v - first) - mean_offset;
            dev * dev
        })
        .sum();
    let sample_var = sum_sq_dev / (n - 1.0);
    (mean, (sample_var / n).sqrt())
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_abs_diff_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(norm_cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-9);
        assert_abs_diff_eq!(norm_cdf(-1.0), 0.158_655_253_931_457, epsilon = 1e-9);
        assert_abs_diff_eq!(norm_cdf(1.0) + norm_cdf(-1.0), 1.0, epsilon = 1e-12);
        assert!(norm_cdf(-12.0) > 0.0, "lower tail must not flush to zero");
    }

    #[test]
    fn test_norm_pdf_peak() {
        assert_abs_diff_eq!(norm_pdf(0.0), 0.398_942_280_401_433, epsilon = 1e-12);
        assert_abs_diff_eq!(norm_pdf(1.5), norm_pdf(-1.5), epsilon = 1e-15);
    }

    #[test]
    fn test_mean_and_std_error() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let (mean, se) = mean_and_std_error(&values);
        assert_abs_diff_eq!(mean, 2.5, epsilon = 1e-15);
        // sample variance 5/3, se = sqrt(5/3 / 4)
        assert_abs_diff_eq!(se, (5.0f64 / 12.0).sqrt(), epsilon = 1e-15);

        let (mean, se) = mean_and_std_error(&[7.0]);
        assert_eq!(mean, 7.0);
        assert_eq!(se, 0.0);
    }

    #[test]
    fn test_constant_sample_has_exact_statistics() {
        let values = [1.2; 10];
        let (mean, se) = mean_and_std_error(&values);
        assert_eq!(mean, 1.2);
        assert_eq!(se, 0.0);

        let (mean, se) = mean_and_std_error(&[] as &[f64]);
        assert!(mean.is_nan() && se.is_nan());
    }
}
