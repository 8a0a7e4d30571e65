//! `epilog` — summarize a compartmental simulator log.
//!
//! Scans the log, checks mass conservation at every step, and writes the
//! global and per-region time series under the output directory.  Nothing
//! is written unless the whole log scanned cleanly.

mod config;
mod progress;


use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ep_core::{LogFormat, ScanMode};
use ep_output::{CsvWriter, OutputWriter, write_output};
use ep_scan::LogScanner;

use crate::config::Overrides;
use crate::progress::ProgressObserver;

/// Scan a simulator state log and write summary tables
#[derive(Parser, Debug)]
#[command(name = "epilog")]
#[command(about = "Aggregate a simulator state log into global and per-region time series")]
struct Args {
    /// Simulator log to read
    #[arg(long, default_value = "logs/pandemic_state.txt")]
    log: PathBuf,

    /// Directory the tables are written to (created if missing)
    #[arg(long, default_value = "logs/stats")]
    out: PathBuf,

    /// Optional TOML file with scan settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// State vector layout: legacy or current
    #[arg(long)]
    format: Option<LogFormat>,

    /// Rows to produce: aggregate, regions, or both
    #[arg(long)]
    mode: Option<ScanMode>,

    /// Capture populations over the whole log instead of the priming section
    #[arg(long)]
    full_scan: bool,

    /// Write an SQLite database instead of CSV files (needs the `sqlite` feature)
    #[arg(long)]
    sqlite: bool,

    /// Log progress every N aggregated steps (0 disables)
    #[arg(long, default_value_t = 100)]
    progress_every: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let overrides = Overrides {
        format:    args.format,
        mode:      args.mode,
        full_scan: args.full_scan,
    };
    let config = config::load(args.config.as_deref(), &overrides)?;
    tracing::info!(log = %args.log.display(), format = %config.format, "scanning");

    let scanner = LogScanner::new(config)?;
    let mut progress = ProgressObserver::new(args.progress_every);
    let output = scanner
        .scan_path(&args.log, &mut progress)
        .with_context(|| format!("scanning {}", args.log.display()))?;

    if args.sqlite {
        write_sqlite(&args.out, &output)?;
        tracing::info!(out = %args.out.display(), "done");
        return Ok(());
    }

    let mut writer = CsvWriter::new(&args.out, output.format)
        .with_context(|| format!("creating {}", args.out.display()))?;
    write_output(&mut writer, &output)?;
    writer.finish()?;

    tracing::info!(out = %args.out.display(), "done");
    Ok(())
}

#[cfg(feature = "sqlite")]
fn write_sqlite(out: &std::path::Path, output: &ep_scan::ScanOutput) -> anyhow::Result<()> {
    let mut writer = ep_output::SqliteWriter::new(out, output.format)?;
    write_output(&mut writer, output)?;
    writer.finish()?;
    Ok(())
}

#[cfg(not(feature = "sqlite"))]
fn write_sqlite(_out: &std::path::Path, _output: &ep_scan::ScanOutput) -> anyhow::Result<()> {
    anyhow::bail!("--sqlite requires epilog to be built with the `sqlite` feature")
}
