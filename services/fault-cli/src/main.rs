//! Finite-fault converter.
//!
//! Reads a finite-source (FSP) slip model and writes one GeoJSON polygon
//! per subfault cell, or a JSON rupture summary per segment.

mod config;
mod convert;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::{split_columns, CliConfig};
use convert::OutputKind;

#[derive(Parser, Debug)]
#[command(name = "fault-cli")]
#[command(about = "Convert finite-fault slip models to GeoJSON")]
struct Args {
    /// Finite-source (.fsp) input file
    #[arg(short, long, env = "FSP_INPUT")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, env = "FAULT_OUTPUT")]
    output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "FAULT_CLI_CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated data column names, overriding the config
    #[arg(long)]
    columns: Option<String>,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Write per-segment rupture summaries instead of GeoJSON
    #[arg(long)]
    summary_only: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs);

    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    }
    .with_env_overrides();
    if let Some(columns) = &args.columns {
        config.columns = split_columns(columns);
    }

    let kind = if args.summary_only {
        OutputKind::Summary
    } else {
        OutputKind::GeoJson
    };
    info!(input = %args.input.display(), ?kind, "Starting conversion");

    let text = convert::convert(&config, &args.input, kind)?;
    convert::write_output(&text, args.output.as_deref())
}

/// Logs go to stderr so stdout carries only the JSON output.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
