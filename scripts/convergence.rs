// scripts/convergence.rs
//! Monte Carlo convergence study for the reference contract.
//!
//! Runs the terminal-price simulation at increasing path counts and reports the
//! standard error. Under 1/√n convergence, `std_error × √n` stays roughly constant.

use commodity_pricer::math_utils::Timer;
use commodity_pricer::mc::{simulate_terminal, Execution, SimulationConfig, TerminalEstimate};
use commodity_pricer::MarketParameters;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PATH_COUNTS: [usize; 6] = [250, 1_000, 4_000, 16_000, 64_000, 256_000];
const STEPS: usize = 252;
const SEED: u64 = 42;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

struct ConvergenceRow {
    estimate: TerminalEstimate,
    time_ms: f64,
}

impl ConvergenceRow {
    fn scaled_error(&self) -> f64 {
        self.estimate.std_error * (self.estimate.num_paths as f64).sqrt()
    }
}

fn run_study(params: &MarketParameters) -> commodity_pricer::Result<Vec<ConvergenceRow>> {
    let mut rows = Vec::with_capacity(PATH_COUNTS.len());
    for &paths in &PATH_COUNTS {
        let config = SimulationConfig::new(paths, STEPS, Some(SEED))
            .with_execution(Execution::Parallel);

        let mut timer = Timer::new();
        timer.start();
        let estimate = simulate_terminal(params, &config)?;
        rows.push(ConvergenceRow {
            estimate,
            time_ms: timer.elapsed_ms(),
        });
    }
    Ok(rows)
}

fn write_results_to_csv(
    rows: &[ConvergenceRow],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Run Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "paths,steps,mean,std_error,std_error_sqrt_n,time_ms")?;

    for row in rows {
        writeln!(
            file,
            "{},{},{:.6},{:.6},{:.6},{:.2}",
            row.estimate.num_paths,
            row.estimate.num_steps,
            row.estimate.mean,
            row.estimate.std_error,
            row.scaled_error(),
            row.time_ms
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Monte Carlo Convergence Study");
    println!("=============================\n");

    let system_info = SystemInfo::gather();
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rayon Threads: {}\n", system_info.rayon_threads);

    let params = MarketParameters::default();
    let expected = params.spot_price * (params.risk_free_rate * params.time_to_maturity).exp();
    let rows = run_study(&params)?;

    println!(
        "{:>8} {:>12} {:>12} {:>14} {:>12}",
        "Paths", "Mean", "Std Error", "SE x sqrt(n)", "Time (ms)"
    );
    println!("{:-<62}", "");
    for row in &rows {
        println!(
            "{:>8} {:>12.6} {:>12.6} {:>14.6} {:>12.2}",
            row.estimate.num_paths,
            row.estimate.mean,
            row.estimate.std_error,
            row.scaled_error(),
            row.time_ms
        );
    }
    println!("{:-<62}", "");
    println!("Risk-neutral expectation S0*exp(rT): {:.6}", expected);

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("convergence_{}.csv", timestamp);
    write_results_to_csv(&rows, &system_info, &filename)?;
    println!("\nResults saved to: {}", filename);

    Ok(())
}
