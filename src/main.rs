//! commodity-pricer CLI
//!
//! Prices a commodity contract by cost of carry, Black-Scholes and Monte Carlo,
//! then prints or writes the report.

use anyhow::{Context, Result};
use clap::Parser;
use commodity_pricer::config::RunConfig;
use commodity_pricer::output::{self, ReportFormat};
use commodity_pricer::{value_contract, Execution};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fair value of a commodity futures contract and European call option
#[derive(Parser, Debug)]
#[command(name = "commodity-pricer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE", env = "COMMODITY_PRICER_CONFIG")]
    config: Option<PathBuf>,

    /// Current spot price
    #[arg(long)]
    spot: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Continuously compounded storage cost
    #[arg(long, allow_negative_numbers = true)]
    storage_cost: Option<f64>,

    /// Time to maturity in years
    #[arg(long)]
    maturity: Option<f64>,

    /// Option strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Annualised volatility
    #[arg(long)]
    volatility: Option<f64>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    paths: Option<usize>,

    /// Number of time steps per path
    #[arg(short, long)]
    steps: Option<usize>,

    /// Random seed for a reproducible simulation
    #[arg(long, conflicts_with = "unseeded")]
    seed: Option<u64>,

    /// Seed the simulation from OS entropy
    #[arg(long)]
    unseeded: bool,

    /// Advance paths in parallel (same result as sequential)
    #[arg(long)]
    parallel: bool,

    /// Output format (text, json, csv)
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Currency prefix for monetary amounts
    #[arg(long)]
    currency: Option<String>,

    /// Quantity unit for the futures price
    #[arg(long)]
    unit: Option<String>,

    /// Decimal places in the text report
    #[arg(long)]
    decimals: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COMMODITY_PRICER_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    /// Layer command-line values over the file (or default) configuration.
    fn apply(&self, cfg: &mut RunConfig) {
        let market = &mut cfg.market;
        if let Some(v) = self.spot {
            market.spot_price = v;
        }
        if let Some(v) = self.rate {
            market.risk_free_rate = v;
        }
        if let Some(v) = self.storage_cost {
            market.storage_cost = v;
        }
        if let Some(v) = self.maturity {
            market.time_to_maturity = v;
        }
        if let Some(v) = self.strike {
            market.strike_price = v;
        }
        if let Some(v) = self.volatility {
            market.volatility = v;
        }

        let sim = &mut cfg.simulation;
        if let Some(v) = self.paths {
            sim.num_paths = v;
        }
        if let Some(v) = self.steps {
            sim.num_steps = v;
        }
        if self.seed.is_some() {
            sim.random_seed = self.seed;
        }
        if self.unseeded {
            sim.random_seed = None;
        }
        if self.parallel {
            sim.execution = Execution::Parallel;
        }

        let report = &mut cfg.report;
        if let Some(v) = self.format {
            report.format = v;
        }
        if let Some(v) = &self.currency {
            report.currency = v.clone();
        }
        if let Some(v) = &self.unit {
            report.unit = v.clone();
        }
        if let Some(v) = self.decimals {
            report.decimals = v;
        }

        if let Some(v) = &self.log_level {
            cfg.log_level = v.clone();
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RunConfig::default(),
    };
    args.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;

    init_tracing(&cfg.log_level);
    info!(
        market = ?cfg.market,
        simulation = ?cfg.simulation,
        "configuration loaded"
    );

    let valuation = value_contract(&cfg.market, &cfg.simulation).context("pricing failed")?;
    let report = output::render(&valuation, &cfg.report)?;

    match &args.output {
        Some(path) => {
            output::write_report(path, &report)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{}", report),
    }

    Ok(())
}
