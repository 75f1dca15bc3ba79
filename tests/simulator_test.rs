// tests/simulator_test.rs
use approx::assert_relative_eq;
use commodity_pricer::mc::{
    simulate, simulate_grid, simulate_terminal, Execution, SimulationConfig,
};
use commodity_pricer::models::gbm::Gbm;
use commodity_pricer::rng::standard_normal_draws;
use commodity_pricer::MarketParameters;
use proptest::prelude::*;

#[test]
fn test_reference_contract_terminal_price() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(1_000, 252, Some(42));

    let estimate = simulate_terminal(&params, &config).expect("Valid configuration");
    let expected = params.spot_price * (params.risk_free_rate * params.time_to_maturity).exp();

    println!("\nMC terminal mean: {}", estimate.mean);
    println!("Std error: {}", estimate.std_error);
    println!("Risk-neutral expectation: {}", expected);

    assert!(
        (estimate.mean - 1.21).abs() < 0.02,
        "Terminal estimate {} not within 0.02 of 1.21",
        estimate.mean
    );
    assert!(estimate.std_error > 0.0 && estimate.std_error < 0.02);
}

#[test]
fn test_same_seed_bit_identical() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(500, 64, Some(2024));

    let first = simulate_grid(&params, &config).unwrap();
    let second = simulate_grid(&params, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        simulate(&params, &config).unwrap().to_bits(),
        simulate(&params, &config).unwrap().to_bits()
    );
}

#[test]
fn test_different_seeds_differ() {
    let params = MarketParameters::default();
    let a = simulate(&params, &SimulationConfig::new(500, 64, Some(1))).unwrap();
    let b = simulate(&params, &SimulationConfig::new(500, 64, Some(2))).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_parallel_matches_sequential() {
    let params = MarketParameters::default();
    let sequential = SimulationConfig::new(2_000, 100, Some(42));
    let parallel = sequential.with_execution(Execution::Parallel);

    let seq_grid = simulate_grid(&params, &sequential).unwrap();
    let par_grid = simulate_grid(&params, &parallel).unwrap();

    assert_eq!(seq_grid, par_grid, "parallel stepping changed the price grid");
    assert_eq!(
        seq_grid.terminal_mean().to_bits(),
        par_grid.terminal_mean().to_bits()
    );
}

#[test]
fn test_zero_volatility_is_deterministic() {
    let params = MarketParameters {
        volatility: 0.0,
        ..Default::default()
    };
    let config = SimulationConfig::new(100, 252, Some(42));

    let estimate = simulate_terminal(&params, &config).expect("zero volatility is valid");
    let expected = params.spot_price * (params.risk_free_rate * params.time_to_maturity).exp();

    assert_eq!(estimate.min, estimate.max, "paths should not disperse");
    assert_relative_eq!(estimate.mean, expected, max_relative = 1e-12);
    assert_eq!(estimate.std_error, 0.0);
}

#[test]
fn test_single_step_single_path() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(1, 1, Some(7));

    let grid = simulate_grid(&params, &config).unwrap();
    assert_eq!(grid.num_steps(), 1);
    assert_eq!(grid.num_paths(), 1);

    let z = standard_normal_draws(1, Some(7))[0];
    let expected = Gbm::risk_neutral(&params, 1).step(params.spot_price, z);
    assert_eq!(grid.get(1, 0), Some(expected));
    assert_eq!(simulate(&params, &config).unwrap(), expected);
}

#[test]
fn test_first_step_consumes_first_draws() {
    let params = MarketParameters::default();
    let config = SimulationConfig::new(4, 3, Some(99));

    let grid = simulate_grid(&params, &config).unwrap();
    let draws = standard_normal_draws(12, Some(99));
    let gbm = Gbm::risk_neutral(&params, 3);

    for path in 0..4 {
        let mut s = params.spot_price;
        for step in 0..3 {
            s = gbm.step(s, draws[step * 4 + path]);
        }
        assert_eq!(grid.get(3, path), Some(s), "path {} diverged", path);
    }
}

#[test]
fn test_invalid_configuration_rejected() {
    let params = MarketParameters::default();
    for config in [
        SimulationConfig::new(0, 252, Some(42)),
        SimulationConfig::new(1_000, 0, Some(42)),
    ] {
        let err = simulate(&params, &config).unwrap_err();
        println!("Rejected: {}", err);
        assert!(err.is_configuration_error());
    }

    let bad_market = MarketParameters {
        time_to_maturity: 0.0,
        ..Default::default()
    };
    let err = simulate(&bad_market, &SimulationConfig::default()).unwrap_err();
    assert!(err.to_string().contains("time_to_maturity"));
}

#[test]
fn test_underflowing_time_step_rejected() {
    // A subnormal maturity split into steps rounds dt to zero.
    let params = MarketParameters {
        time_to_maturity: 5e-324,
        ..Default::default()
    };
    let config = SimulationConfig::new(10, 4, Some(42));
    assert!(params.validate().is_ok());

    let err = simulate_terminal(&params, &config).unwrap_err();
    println!("Rejected: {}", err);
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("'dt'"));
}

#[test]
fn test_standard_error_scales_with_inverse_sqrt_paths() {
    let params = MarketParameters::default();
    let small = simulate_terminal(&params, &SimulationConfig::new(2_000, 50, Some(11))).unwrap();
    let large = simulate_terminal(&params, &SimulationConfig::new(8_000, 50, Some(12))).unwrap();

    let ratio = small.std_error / large.std_error;
    println!("\nSE(2k) = {}, SE(8k) = {}, ratio = {}", small.std_error, large.std_error, ratio);
    assert!(
        ratio > 1.7 && ratio < 2.3,
        "quadrupling paths should halve the standard error, got ratio {}",
        ratio
    );
}

#[test]
fn test_unseeded_runs_still_valid() {
    let params = MarketParameters::default();
    let estimate = simulate_terminal(&params, &SimulationConfig::new(200, 20, None)).unwrap();
    assert!(estimate.mean.is_finite() && estimate.mean > 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_grid_strictly_positive(
        spot in 0.1f64..100.0,
        rate in -0.05f64..0.15,
        maturity in 0.05f64..3.0,
        volatility in 0.0f64..1.0,
        paths in 1usize..32,
        steps in 1usize..32,
        seed in any::<u64>(),
    ) {
        let params = MarketParameters::new(spot, rate, 0.0, maturity, 1.0, volatility);
        let config = SimulationConfig::new(paths, steps, Some(seed));

        let grid = simulate_grid(&params, &config).unwrap();
        prop_assert_eq!(grid.num_steps(), steps);
        prop_assert!(grid.row(0).iter().all(|&p| p == spot));
        prop_assert!(grid.as_array().iter().all(|&p| p.is_finite() && p > 0.0));
    }

    #[test]
    fn prop_seeded_simulation_is_deterministic(
        volatility in 0.0f64..0.8,
        seed in any::<u64>(),
    ) {
        let params = MarketParameters { volatility, ..Default::default() };
        let config = SimulationConfig::new(16, 8, Some(seed));
        let a = simulate(&params, &config).unwrap();
        let b = simulate(&params, &config).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}
