//! CPU utilization plotting pipeline
//!
//! This crate provides the core functionality for:
//! - Sampling: running mpstat in per-CPU mode for a fixed window
//! - Parsing: extracting per-category percentages from the captured table
//! - Rendering: drawing the series for one CPU as a time-series chart
//!
//! The pipeline is fully synchronous: sample, parse, render, in order.

pub mod chart;
pub mod models;
pub mod parser;
pub mod sampler;

pub use chart::render_chart;
pub use models::{CpuSeries, Metric, Sample, METRICS};
pub use parser::{parse_mpstat, HeaderSchema, ParseError};
pub use sampler::{Sampler, SamplerConfig, SamplerError};
