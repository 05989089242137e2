//! BuyDip CLI — non-interactive scenario reports.
//!
//! Commands:
//! - `summary` — per-scenario metrics as a table, JSON or CSV on stdout
//! - `check` — validate a TOML config file
//! - `default-config` — print the default configuration as TOML

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use buydip_core::chart::dollars;
use buydip_core::{summarize, ScenarioResult, SimulationConfig};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "buydip",
    about = "BuyDip CLI — buy-the-dip pullback scenario reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-scenario cost basis, breakeven and return.
    Summary {
        /// TOML config file. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Validate a TOML config file.
    Check {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// One flat CSV row per scenario.
#[derive(Debug, Serialize)]
struct SummaryRow {
    pullback_pct: i64,
    bottom_x: f64,
    bottom_price: f64,
    first_buy_price: f64,
    num_buys: usize,
    total_cost: f64,
    avg_cost: f64,
    breakeven_x: f64,
    end_x: f64,
    final_value: f64,
    return_pct: f64,
}

impl From<&ScenarioResult> for SummaryRow {
    fn from(r: &ScenarioResult) -> Self {
        Self {
            pullback_pct: r.pullback_pct(),
            bottom_x: r.turn_point.x,
            bottom_price: r.turn_point.y,
            first_buy_price: r.buy_prices.first().copied().unwrap_or(r.turn_point.y),
            num_buys: r.buy_prices.len(),
            total_cost: r.total_cost,
            avg_cost: r.avg_cost,
            breakeven_x: r.breakeven_point.x,
            end_x: r.end_point.x,
            final_value: r.final_value,
            return_pct: r.return_pct,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Summary { config, format } => {
            let config = load_config(config.as_deref())?;
            run_summary(&config, format, &mut out)
        }
        Commands::Check { config } => {
            let loaded = load_config(Some(config.as_path()))?;
            writeln!(
                out,
                "OK: {} ({} scenarios, {} buys each)",
                config.display(),
                loaded.pullback_fractions.len(),
                loaded.num_buys
            )?;
            Ok(())
        }
        Commands::DefaultConfig => {
            let text = SimulationConfig::default()
                .to_toml()
                .context("serializing default config")?;
            write!(out, "{text}")?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

fn run_summary<W: Write>(config: &SimulationConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    let results = summarize(config).context("computing scenarios")?;
    tracing::info!(scenarios = results.len(), ?format, "writing summary");

    match format {
        OutputFormat::Table => print_table(config, &results, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &results)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for r in &results {
                writer.serialize(SummaryRow::from(r))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn print_table<W: Write>(
    config: &SimulationConfig,
    results: &[ScenarioResult],
    out: &mut W,
) -> io::Result<()> {
    let start = config.start_point;
    writeln!(out)?;
    writeln!(out, "=== BuyDip Scenarios ===")?;
    writeln!(out, "Peak:           ${:.2} at t={:.1}", start.y, start.x)?;
    writeln!(
        out,
        "Slopes:         drop {:.1}°, rise {:.1}°",
        config.drop_angle_deg, config.rise_angle_deg
    )?;
    writeln!(out, "Buys/scenario:  {}", config.num_buys)?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<9} {:>8} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Pullback", "Dip", "1st Buy", "Bottom", "Breakeven", "Final", "Return"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;
    for r in results {
        writeln!(
            out,
            "{:<9} {:>8.2} {:>10} {:>10} {:>10} {:>10} {:>8.1}%",
            format!("{}%", r.pullback_pct()),
            r.dip_amount(start),
            r.buy_prices.first().map(|p| dollars(*p)).unwrap_or_default(),
            dollars(r.turn_point.y),
            dollars(r.avg_cost),
            dollars(r.final_value),
            r.return_pct,
        )?;
    }
    writeln!(out)?;
    Ok(())
}
