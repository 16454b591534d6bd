//! IO module - configuration, logging and result files.

mod config;
mod output;

pub use config::{SimulationConfig, TemperatureSeries};
pub use output::{log_results, setup_logging, ScanReport};
