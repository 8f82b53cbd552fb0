use anyhow::Result;
use clap::Parser;
use partnerpulse::{
    config::Config,
    fetch::{load_or_fallback, DirSource, HttpSource, LoadOutcome},
    report::period_report,
};
use std::{io::Write, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "partnerpulse", about = "Load the partner performance sheets as JSON")]
struct Args {
    /// YAML config with sheet URLs and fallback settings
    #[arg(short, long, env = "PARTNERPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Read `<sheet>.csv` files from this directory instead of fetching
    #[arg(long)]
    sheet_dir: Option<PathBuf>,

    /// JSON dataset to use when the live load fails
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Print the period report instead of the full dataset
    #[arg(long)]
    summary: bool,

    /// First month of the report period (0 = Jan)
    #[arg(long, default_value_t = 0)]
    from: usize,

    /// Last month of the report period; defaults to the current month
    #[arg(long)]
    to: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,partnerpulse=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configuration ────────────────────────────────────────────
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_env();
    if args.sheet_dir.is_some() {
        config.sheet_dir = args.sheet_dir.clone();
    }
    if args.fallback.is_some() {
        config.fallback_path = args.fallback.clone();
    }

    let fallback = config.fallback().unwrap_or_else(|e| {
        warn!("fallback dataset unusable, using empty one: {:#}", e);
        Default::default()
    });

    // ─── 3) one load cycle ───────────────────────────────────────────
    let outcome: LoadOutcome = match &config.sheet_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "reading sheets from disk");
            load_or_fallback(&DirSource::new(dir), &fallback).await
        }
        None => load_or_fallback(&HttpSource::new(&config.sheets)?, &fallback).await,
    };
    info!(source = ?outcome.source, "load cycle finished");

    // ─── 4) emit JSON ────────────────────────────────────────────────
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.summary {
        let to = args.to.unwrap_or(outcome.dataset.snapshot.current_month_idx);
        let report = period_report(&outcome.dataset, args.from, to);
        serde_json::to_writer_pretty(&mut out, &report)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &outcome)?;
    }
    writeln!(out)?;
    Ok(())
}
