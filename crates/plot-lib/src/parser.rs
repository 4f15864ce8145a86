//! mpstat table parsing
//!
//! mpstat prints a fresh header line before every sample block, so a capture
//! is a mix of banner lines, blank lines, repeated headers and data rows.
//! The column layout is not fixed across mpstat versions or locales; it is
//! resolved once from the first header line and reused for the whole
//! capture, since column order is stable within one invocation.

use crate::models::{CpuSeries, Metric, Sample, METRICS};
use thiserror::Error;
use tracing::debug;

/// Errors produced while parsing an mpstat capture
#[derive(Debug, Error)]
pub enum ParseError {
    /// No line in the capture contains the `%usr` header token
    #[error("no mpstat header line found (no line contains `%usr`)")]
    MissingHeader,

    /// The header line lacks a column this parser requires
    #[error("mpstat header has no usable `{column}` column")]
    MissingColumn { column: &'static str },

    /// A matching data row ends before the last required column
    #[error("line {line}: row has {found} columns, schema requires {required}")]
    ShortRow {
        line: usize,
        required: usize,
        found: usize,
    },

    /// A metric field did not parse as a number
    #[error("line {line}: `{token}` in column `{column}` is not numeric")]
    MalformedValue {
        line: usize,
        column: &'static str,
        token: String,
    },
}

/// Column layout resolved from the first mpstat header line.
///
/// Maps each extracted metric to its token position, and derives the
/// CPU-identifier and interval-label positions (the label sits one token
/// before `CPU`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    metric_idx: [usize; METRICS.len()],
    cpu_idx: usize,
    time_idx: usize,
    max_idx: usize,
}

impl HeaderSchema {
    /// Resolve column positions from a whitespace-tokenized header line
    pub fn from_header(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let cpu_idx = tokens
            .iter()
            .position(|t| *t == "CPU")
            .filter(|idx| *idx > 0)
            .ok_or(ParseError::MissingColumn { column: "CPU" })?;
        let time_idx = cpu_idx - 1;

        let mut metric_idx = [0usize; METRICS.len()];
        for (slot, metric) in METRICS.iter().enumerate() {
            metric_idx[slot] = tokens
                .iter()
                .position(|t| *t == metric.column())
                .ok_or(ParseError::MissingColumn {
                    column: metric.column(),
                })?;
        }

        let max_idx = metric_idx.iter().copied().max().unwrap_or(0).max(cpu_idx);

        Ok(Self {
            metric_idx,
            cpu_idx,
            time_idx,
            max_idx,
        })
    }

    /// Token position of the CPU-identifier column
    pub fn cpu_index(&self) -> usize {
        self.cpu_idx
    }

    /// Token position of the interval label
    pub fn time_index(&self) -> usize {
        self.time_idx
    }

    /// Token position of one metric column
    pub fn metric_index(&self, metric: Metric) -> usize {
        let slot = METRICS.iter().position(|m| *m == metric).unwrap_or(0);
        self.metric_idx[slot]
    }

    /// True when the row carries the requested CPU identifier.
    ///
    /// The match is case-sensitive and exact; `"all"` is an ordinary
    /// identifier, not a wildcard. Blank lines, banners and header rows all
    /// fail this test and are skipped by the caller.
    fn matches(&self, tokens: &[&str], cpu_id: &str) -> bool {
        tokens.len() > self.cpu_idx && tokens[self.cpu_idx] == cpu_id
    }

    /// Extract one data row. `line` is the 1-based line number, used only
    /// for error reporting.
    fn extract(&self, line: usize, tokens: &[&str]) -> Result<Sample, ParseError> {
        if tokens.len() <= self.max_idx {
            return Err(ParseError::ShortRow {
                line,
                required: self.max_idx + 1,
                found: tokens.len(),
            });
        }

        let mut values = [0f64; METRICS.len()];
        for (slot, metric) in METRICS.iter().enumerate() {
            let token = tokens[self.metric_idx[slot]];
            // mpstat follows the locale, so the decimal separator may be a
            // comma; normalize each metric field independently.
            values[slot] =
                token
                    .replace(',', ".")
                    .parse()
                    .map_err(|_| ParseError::MalformedValue {
                        line,
                        column: metric.column(),
                        token: token.to_string(),
                    })?;
        }

        Ok(Sample {
            // The interval label is opaque: never comma-normalized, never
            // parsed as a number.
            time: tokens[self.time_idx].to_string(),
            usr: values[0],
            sys: values[1],
            iowait: values[2],
            irq: values[3],
            soft: values[4],
            idle: values[5],
        })
    }
}

/// Parse a raw mpstat capture, extracting the series for one CPU identifier.
///
/// The first line containing `%usr` defines the column layout; later header
/// lines from subsequent sample blocks fail the identifier match and are
/// skipped. Rows for other CPUs, blank lines and the `Linux ...` banner are
/// skipped silently. A capture that never mentions `cpu_id` yields an empty
/// series, not an error.
pub fn parse_mpstat(raw: &str, cpu_id: &str) -> Result<CpuSeries, ParseError> {
    let header = raw
        .lines()
        .find(|line| line.contains("%usr"))
        .ok_or(ParseError::MissingHeader)?;
    let schema = HeaderSchema::from_header(header)?;
    debug!(
        cpu_column = schema.cpu_idx,
        time_column = schema.time_idx,
        "resolved mpstat header schema"
    );

    let mut series = CpuSeries::new(cpu_id);
    for (idx, line) in raw.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() > 1 && schema.matches(&tokens, cpu_id) {
            series.push(schema.extract(idx + 1, &tokens)?);
        }
    }

    Ok(series)
}
