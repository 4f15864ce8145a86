//! mpstat invocation
//!
//! Runs mpstat in per-CPU reporting mode for a fixed number of samples,
//! capturing its stdout to a file. The call blocks for the whole sampling
//! window (interval x count seconds); the pipeline is synchronous by
//! design, so that wait happens inline.

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from running the sampling utility. Both are fatal to the
/// pipeline; no partial chart is produced.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// The program could not be started at all (typically not installed)
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran but reported failure
    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },

    /// The capture file could not be created
    #[error("failed to create capture file {path}: {source}")]
    Capture {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Sampling parameters
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Program to invoke; overridable via `CPUPLOT_MPSTAT` for systems
    /// where mpstat is not on PATH
    pub program: String,
    /// Seconds between samples
    pub interval_secs: u64,
    /// Number of samples to take
    pub count: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            interval_secs: 1,
            count: 5,
        }
    }
}

fn default_program() -> String {
    std::env::var("CPUPLOT_MPSTAT").unwrap_or_else(|_| "mpstat".to_string())
}

/// Runs the sampling utility and captures its output
#[derive(Debug, Clone)]
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the program: per-CPU mode, interval, count
    pub fn args(&self) -> [String; 4] {
        [
            "-P".to_string(),
            "ALL".to_string(),
            self.config.interval_secs.to_string(),
            self.config.count.to_string(),
        ]
    }

    /// Run the utility, redirecting stdout to `path`. Blocks until the
    /// sampling window ends. Any non-zero exit status is an error.
    pub fn capture_to(&self, path: &Path) -> Result<(), SamplerError> {
        let file = File::create(path).map_err(|source| SamplerError::Capture {
            path: path.display().to_string(),
            source,
        })?;

        info!(
            program = %self.config.program,
            interval_secs = self.config.interval_secs,
            count = self.config.count,
            "sampling CPU utilization"
        );

        let status = Command::new(&self.config.program)
            .args(self.args())
            .stdout(Stdio::from(file))
            .status()
            .map_err(|source| SamplerError::Launch {
                program: self.config.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SamplerError::Failed {
                program: self.config.program.clone(),
                status,
            });
        }

        debug!(path = %path.display(), "capture complete");
        Ok(())
    }
}
