//! Terminal output formatting

use clap::ValueEnum;
use colored::Colorize;
use cpuplot_lib::CpuSeries;
use tabled::{settings::Style, Table, Tabled};

/// How the parsed samples are echoed to the terminal
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "#")]
    index: usize,
    time: String,
    #[tabled(rename = "%usr")]
    usr: f64,
    #[tabled(rename = "%sys")]
    sys: f64,
    #[tabled(rename = "%iowait")]
    iowait: f64,
    #[tabled(rename = "%irq")]
    irq: f64,
    #[tabled(rename = "%soft")]
    soft: f64,
    #[tabled(rename = "%idle")]
    idle: f64,
}

/// Print the parsed series in the requested format
pub fn print_series(series: &CpuSeries, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<SampleRow> = series
                .samples()
                .enumerate()
                .map(|(index, sample)| SampleRow {
                    index,
                    time: sample.time,
                    usr: sample.usr,
                    sys: sample.sys,
                    iowait: sample.iowait,
                    irq: sample.irq,
                    soft: sample.soft,
                    idle: sample.idle,
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(series) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
