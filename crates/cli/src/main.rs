//! cpuplot CLI
//!
//! Samples CPU utilization with mpstat (or parses an existing capture),
//! extracts the series for one CPU identifier and renders it as a
//! time-series chart.

mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cpuplot_lib::{parse_mpstat, render_chart, Sampler, SamplerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where the capture lands when `--keep-raw` is given, matching the
/// sampling tool's conventional output name
const KEPT_CAPTURE: &str = "mpstat_output.txt";

/// Chart CPU utilization sampled with mpstat
#[derive(Parser)]
#[command(name = "cpuplot")]
#[command(author, version, about = "Chart CPU utilization sampled with mpstat", long_about = None)]
struct Cli {
    /// CPU identifier to chart ("all" or a core number)
    #[arg(default_value = "all")]
    cpu_id: String,

    /// Output chart path; format follows the extension (.png, .bmp or .svg)
    #[arg(default_value = "output.png")]
    output: PathBuf,

    /// Parse an existing mpstat capture instead of sampling
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Seconds between samples
    #[arg(long, default_value_t = 1)]
    interval: u64,

    /// Number of samples to take
    #[arg(long, default_value_t = 5)]
    count: u32,

    /// Keep the raw capture as mpstat_output.txt instead of deleting it
    #[arg(long)]
    keep_raw: bool,

    /// How to echo the parsed samples
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Do not echo the parsed samples
    #[arg(long, short)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Exit-code translation lives here and nowhere else
    if let Err(err) = run(&cli) {
        output::print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => sample(cli)?,
    };

    let series = parse_mpstat(&raw, &cli.cpu_id)?;
    if series.is_empty() {
        output::print_warning(&format!(
            "CPU `{}` never appeared in the capture; the chart will be empty",
            cli.cpu_id
        ));
    } else if !cli.quiet {
        output::print_series(&series, cli.format);
    }

    render_chart(&series, &cli.cpu_id, &cli.output)?;
    output::print_success(&format!("chart written to {}", cli.output.display()));
    Ok(())
}

/// Run mpstat against a per-invocation temp file and return the capture.
/// The file is removed on drop; deletion is best-effort cleanup on every
/// path unless `--keep-raw` persists it.
fn sample(cli: &Cli) -> Result<String> {
    let sampler = Sampler::new(SamplerConfig {
        interval_secs: cli.interval,
        count: cli.count,
        ..SamplerConfig::default()
    });

    let capture = tempfile::Builder::new()
        .prefix("cpuplot-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create capture file")?;

    sampler.capture_to(capture.path())?;
    let raw = std::fs::read_to_string(capture.path())
        .with_context(|| format!("failed to read capture {}", capture.path().display()))?;

    if cli.keep_raw {
        capture
            .persist(Path::new(KEPT_CAPTURE))
            .context("failed to keep raw capture")?;
        output::print_info(&format!("raw capture kept as {KEPT_CAPTURE}"));
    }

    Ok(raw)
}
