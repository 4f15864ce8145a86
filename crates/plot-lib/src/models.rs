//! Core data models for the CPU plotter

use serde::{Deserialize, Serialize};

/// Utilization categories extracted from mpstat output, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Usr,
    Sys,
    Iowait,
    Irq,
    Soft,
    Idle,
}

/// All extracted metrics, in the order they are charted.
pub const METRICS: [Metric; 6] = [
    Metric::Usr,
    Metric::Sys,
    Metric::Iowait,
    Metric::Irq,
    Metric::Soft,
    Metric::Idle,
];

impl Metric {
    /// Bare metric name as used in field and JSON keys
    pub fn name(self) -> &'static str {
        match self {
            Metric::Usr => "usr",
            Metric::Sys => "sys",
            Metric::Iowait => "iowait",
            Metric::Irq => "irq",
            Metric::Soft => "soft",
            Metric::Idle => "idle",
        }
    }

    /// Column token as it appears in the mpstat header, e.g. `%usr`.
    /// Also used as the legend label.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Usr => "%usr",
            Metric::Sys => "%sys",
            Metric::Iowait => "%iowait",
            Metric::Irq => "%irq",
            Metric::Soft => "%soft",
            Metric::Idle => "%idle",
        }
    }
}

/// One extracted data row: the interval label plus six percentages.
///
/// The label is kept as the original string; mpstat emits it relative to
/// an unspecified epoch, so it is an opaque x-axis annotation rather than
/// a numeric coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub usr: f64,
    pub sys: f64,
    pub iowait: f64,
    pub irq: f64,
    pub soft: f64,
    pub idle: f64,
}

/// Utilization time series for a single CPU identifier, stored as parallel
/// vectors indexed by sample order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuSeries {
    /// The identifier the series was filtered for (`"all"` or a core number)
    pub cpu_id: String,
    /// Interval labels, one per sample, kept verbatim
    pub time: Vec<String>,
    pub usr: Vec<f64>,
    pub sys: Vec<f64>,
    pub iowait: Vec<f64>,
    pub irq: Vec<f64>,
    pub soft: Vec<f64>,
    pub idle: Vec<f64>,
}

impl CpuSeries {
    /// Create an empty series for the given CPU identifier
    pub fn new(cpu_id: impl Into<String>) -> Self {
        Self {
            cpu_id: cpu_id.into(),
            ..Self::default()
        }
    }

    /// Number of samples in the series
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when no row matched the requested CPU identifier
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Append one extracted row, keeping all columns the same length
    pub fn push(&mut self, sample: Sample) {
        self.time.push(sample.time);
        self.usr.push(sample.usr);
        self.sys.push(sample.sys);
        self.iowait.push(sample.iowait);
        self.irq.push(sample.irq);
        self.soft.push(sample.soft);
        self.idle.push(sample.idle);
    }

    /// Values for one metric, indexed by sample order
    pub fn column(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Usr => &self.usr,
            Metric::Sys => &self.sys,
            Metric::Iowait => &self.iowait,
            Metric::Irq => &self.irq,
            Metric::Soft => &self.soft,
            Metric::Idle => &self.idle,
        }
    }

    /// Iterate over the sample at each index as an owned row
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).map(move |i| Sample {
            time: self.time[i].clone(),
            usr: self.usr[i],
            sys: self.sys[i],
            iowait: self.iowait[i],
            irq: self.irq[i],
            soft: self.soft[i],
            idle: self.idle[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: &str, usr: f64) -> Sample {
        Sample {
            time: time.to_string(),
            usr,
            sys: 1.0,
            iowait: 0.5,
            irq: 0.0,
            soft: 0.0,
            idle: 90.0,
        }
    }

    #[test]
    fn push_keeps_columns_parallel() {
        let mut series = CpuSeries::new("all");
        assert!(series.is_empty());

        series.push(sample("12:00:01", 5.0));
        series.push(sample("12:00:02", 6.0));

        assert_eq!(series.len(), 2);
        for metric in METRICS {
            assert_eq!(series.column(metric).len(), 2);
        }
        assert_eq!(series.column(Metric::Usr), &[5.0, 6.0]);
        assert_eq!(series.time, vec!["12:00:01", "12:00:02"]);
    }

    #[test]
    fn samples_round_trips_rows() {
        let mut series = CpuSeries::new("3");
        let row = sample("12:00:01", 42.0);
        series.push(row.clone());

        let rows: Vec<Sample> = series.samples().collect();
        assert_eq!(rows, vec![row]);
    }

    #[test]
    fn serializes_with_lowercase_metric_keys() {
        let mut series = CpuSeries::new("all");
        series.push(sample("12:00:01", 5.0));

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["cpu_id"], "all");
        assert_eq!(json["usr"][0], 5.0);
        assert_eq!(json["iowait"][0], 0.5);
    }
}
