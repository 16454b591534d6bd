//! Output formatting and logging utilities

use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};
use crate::error::{IsingError, Result};
use crate::sampling::ScanResults;
use super::config::SimulationConfig;

/// Timestamps as HH:MM:SS (UTC)
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let total_seconds = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;
        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Install the global tracing subscriber, writing to `log_file` or to stdout.
pub fn setup_logging(log_file: Option<&str>) -> Result<()> {
    let installed = match log_file {
        Some(path) => {
            let log = File::create(path)?;
            let file_layer = layer()
                .with_writer(Mutex::new(log))
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false);
            Registry::default().with(file_layer).try_init()
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).try_init()
        }
    };
    installed.map_err(|e| IsingError::Logging(e.to_string()))
}

/// Configuration and results of one scan, as persisted to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub config: SimulationConfig,
    pub results: ScanResults,
}

impl ScanReport {
    pub fn new(config: SimulationConfig, results: ScanResults) -> Self {
        Self { config, results }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Log the scan as a table, one row per temperature.
pub fn log_results(results: &ScanResults) {
    info!(
        "{:>8} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "T", "E", "|M|", "C_v", "chi", "acc"
    );
    for obs in results.iter() {
        info!(
            "{:>8.4} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>8.3}",
            obs.temperature,
            obs.energy,
            obs.magnetization,
            obs.specific_heat,
            obs.susceptibility,
            obs.acceptance_rate
        );
    }
}
