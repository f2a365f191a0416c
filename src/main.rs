//! EOR Simulator - waterflood proxy dashboard backend
//!
//! # Usage
//!
//! ```bash
//! # One simulation cycle at the default control positions
//! eor-simulator
//!
//! # Custom operating point, JSON output
//! eor-simulator run --injection 15000 --sweep-percent 30 --lag-days 45 --format json
//!
//! # Forecast curve as CSV with the high-base preset
//! eor-simulator --preset high-base run --format csv > curve.csv
//!
//! # HTTP API
//! eor-simulator serve --addr 127.0.0.1:8080
//! ```
//!
//! # Environment Variables
//!
//! - `EOR_CONFIG`: Path to a TOML config file
//! - `EOR_SERVER_ADDR`: Server bind address (overridden by `--addr`)
//! - `EOR_CORS_ORIGINS`: Comma-separated origins allowed cross-origin
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

use eor_simulator::api::{create_app, DashboardState};
use eor_simulator::config::{ModelPreset, ProxyConfig};
use eor_simulator::insight::format_thousands;
use eor_simulator::{SimulationReport, Simulator};

const SERVER_ADDR_ENV_VAR: &str = "EOR_SERVER_ADDR";

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "eor-simulator")]
#[command(about = "Waterflood proxy model: injection-driven oil rate forecasting")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides EOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model preset; overrides the config file's `preset` key
    #[arg(long, global = true, value_enum)]
    preset: Option<ModelPreset>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Run one simulation cycle and print the result
    Run(RunArgs),

    /// Serve the HTTP API
    Serve {
        /// Override the server address (default: "0.0.0.0:8080")
        #[arg(short, long)]
        addr: Option<String>,
    },

    /// Print the effective config as TOML, or validate a config file
    Config {
        /// Config file to validate instead of printing
        #[arg(long, value_name = "PATH")]
        validate: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug, Default)]
struct RunArgs {
    /// Target water injection (BWPD); defaults to the control default
    #[arg(short, long)]
    injection: Option<f64>,

    /// Sweep efficiency (%); defaults to the control default
    #[arg(short, long)]
    sweep_percent: Option<f64>,

    /// Response lag (days); must be one of the configured options
    #[arg(short, long)]
    lag_days: Option<u32>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

// ============================================================================
// Run
// ============================================================================

fn run_once(config: &ProxyConfig, args: &RunArgs, out: &mut impl Write) -> Result<()> {
    let controls = &config.controls;
    let input = controls
        .input(
            args.injection.unwrap_or(controls.injection_default_bwpd),
            args.sweep_percent.unwrap_or(controls.sweep_percent_default),
            args.lag_days.unwrap_or(controls.lag_default_days),
        )
        .context("Invalid operating point")?;

    let report = Simulator::from_config(config)
        .run(&input)
        .context("Simulation failed")?;

    match args.format {
        OutputFormat::Text => write_text(out, &report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report).context("Failed to write JSON")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(out, &report)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &SimulationReport) -> Result<()> {
    let ind = &report.indicators;
    let chart = &report.chart;

    writeln!(out, "Live Simulation Metrics ({} preset)", report.preset)?;
    writeln!(out, "  Target Water Injection : {} bpd", format_thousands(ind.target_injection_bwpd, 0))?;
    writeln!(out, "  Predicted Oil Output   : {} bpd", format_thousands(ind.predicted_oil_bopd, 1))?;
    writeln!(out, "  VRR (Voidage Ratio)    : {}", ind.voidage_ratio)?;
    writeln!(out, "  Strategy Rating        : {}", ind.strategy_label)?;
    writeln!(out)?;

    let rows = report.series_rows();
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        writeln!(
            out,
            "Production Forecast Curve: {} points, {} -> {} BWPD, {} -> {} BOPD",
            rows.len(),
            format_thousands(first.injection_rate_bwpd, 0),
            format_thousands(last.injection_rate_bwpd, 0),
            format_thousands(first.oil_rate_bopd, 1),
            format_thousands(last.oil_rate_bopd, 1),
        )?;
    }
    writeln!(
        out,
        "Operating Point: {} BWPD -> {} BOPD",
        format_thousands(chart.operating_point[0], 0),
        format_thousands(chart.operating_point[1], 1),
    )?;
    writeln!(out)?;
    write!(out, "{}", report.insight.to_text())?;
    Ok(())
}

fn write_csv(out: &mut impl Write, report: &SimulationReport) -> Result<()> {
    writeln!(out, "injection_rate_bwpd,oil_rate_bopd")?;
    for row in report.series_rows() {
        writeln!(out, "{},{}", row.injection_rate_bwpd, row.oil_rate_bopd)?;
    }
    Ok(())
}

// ============================================================================
// Serve
// ============================================================================

async fn serve(config: ProxyConfig, addr: Option<String>) -> Result<()> {
    let addr = addr
        .or_else(|| std::env::var(SERVER_ADDR_ENV_VAR).ok())
        .unwrap_or_else(|| config.server.addr.clone());

    info!(
        preset = %config.preset,
        field = %config.field.name,
        base_oil_bopd = config.model.base_oil_bopd,
        rating_threshold = config.model.rating_threshold,
        "Starting EOR simulator API"
    );

    let app = create_app(DashboardState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP API listening on http://{}", addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}

// ============================================================================
// Config
// ============================================================================

fn print_config(args: &CliArgs, validate: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = validate {
        let config = ProxyConfig::load_from_file(path, args.preset)
            .with_context(|| format!("Config {} is invalid", path.display()))?;
        println!("{}: OK (preset {})", path.display(), config.preset);
        return Ok(());
    }

    let config = ProxyConfig::load(args.config.as_deref(), args.preset)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for report output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match &args.command {
        Some(SubCommand::Config { validate }) => print_config(&args, validate.as_ref()),
        Some(SubCommand::Serve { addr }) => {
            let config = ProxyConfig::load(args.config.as_deref(), args.preset)?;
            serve(config, addr.clone()).await
        }
        Some(SubCommand::Run(run_args)) => {
            let config = ProxyConfig::load(args.config.as_deref(), args.preset)?;
            run_once(&config, run_args, &mut std::io::stdout().lock())
        }
        None => {
            let config = ProxyConfig::load(args.config.as_deref(), args.preset)?;
            run_once(&config, &RunArgs::default(), &mut std::io::stdout().lock())
        }
    }
}
