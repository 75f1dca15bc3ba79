// src/output.rs
//! Rendering of valuation results as text, JSON or CSV.

use crate::error::{PricingError, Result};
use crate::pricing::Valuation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "unknown report format '{}': expected text, json or csv",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Prefix for monetary amounts
    pub currency: String,
    /// Quantity unit the spot and futures prices are quoted per
    pub unit: String,
    pub decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            format: ReportFormat::Text,
            currency: "$".to_string(),
            unit: "pound".to_string(),
            decimals: 3,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.decimals > 12 {
            return Err(PricingError::InvalidConfiguration {
                field: "report.decimals".to_string(),
                reason: format!("{} exceeds maximum of 12", self.decimals),
            });
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    valuation: &'a Valuation,
}

/// Render `valuation` in the configured format.
pub fn render(valuation: &Valuation, cfg: &ReportConfig) -> Result<String> {
    cfg.validate()?;
    match cfg.format {
        ReportFormat::Text => Ok(render_text(valuation, cfg)),
        ReportFormat::Json => render_json(valuation, Utc::now()),
        ReportFormat::Csv => Ok(render_csv(valuation)),
    }
}

pub fn render_text(valuation: &Valuation, cfg: &ReportConfig) -> String {
    let d = cfg.decimals;
    let cur = &cfg.currency;
    let result = &valuation.result;
    let terminal = &valuation.terminal;

    let mut out = format!(
        "The fair price of the futures contract is: {}{:.*} per {}.\n",
        cur, d, result.futures_price, cfg.unit
    );
    out.push_str(&format!(
        "The price of the call option is: {}{:.*}.\n",
        cur, d, result.option_price
    ));
    out.push_str(&format!(
        "The average simulated price at maturity is: {}{:.*} (std. error {:.*}, {} paths x {} steps).\n",
        cur,
        d,
        result.simulated_terminal_price,
        d,
        terminal.std_error,
        terminal.num_paths,
        terminal.num_steps
    ));
    out
}

pub fn render_json(valuation: &Valuation, generated_at: DateTime<Utc>) -> Result<String> {
    let report = JsonReport {
        generated_at,
        valuation,
    };
    to_json_pretty(&report)
}

fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PricingError::Serialization {
        format: "json".to_string(),
        reason: e.to_string(),
    })
}

/// `key,value` rows covering inputs, outputs and simulation statistics.
pub fn render_csv(valuation: &Valuation) -> String {
    let mut out = String::from("key,value\n");
    for (key, value) in summary_rows(valuation) {
        out.push_str(&format!("{},{}\n", key, value));
    }
    out
}

fn summary_rows(valuation: &Valuation) -> Vec<(&'static str, String)> {
    let m = &valuation.market;
    let s = &valuation.simulation;
    let r = &valuation.result;
    let t = &valuation.terminal;
    vec![
        ("spot_price", m.spot_price.to_string()),
        ("risk_free_rate", m.risk_free_rate.to_string()),
        ("storage_cost", m.storage_cost.to_string()),
        ("time_to_maturity", m.time_to_maturity.to_string()),
        ("strike_price", m.strike_price.to_string()),
        ("volatility", m.volatility.to_string()),
        ("num_paths", s.num_paths.to_string()),
        ("num_steps", s.num_steps.to_string()),
        (
            "random_seed",
            s.random_seed.map_or_else(String::new, |seed| seed.to_string()),
        ),
        ("futures_price", r.futures_price.to_string()),
        ("option_price", r.option_price.to_string()),
        ("simulated_terminal_price", r.simulated_terminal_price.to_string()),
        ("simulated_std_error", t.std_error.to_string()),
        ("simulated_min", t.min.to_string()),
        ("simulated_max", t.max.to_string()),
    ]
}

pub fn write_report(path: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

pub fn write_summary_to_csv(filename: impl AsRef<Path>, valuation: &Valuation) -> io::Result<()> {
    write_report(filename, &render_csv(valuation))
}
