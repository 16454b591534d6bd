//! Rust Ising - Metropolis Monte Carlo for the 2D Ising model
//!
//! This crate scans an ascending series of temperatures on a periodic L x L lattice and
//! estimates the energy, magnetization and specific heat at each of them. One lattice
//! and one random stream are carried through the whole scan.

pub mod error;
pub mod lattice;
pub mod sampling;
pub mod io;
pub mod analysis;

// Re-export commonly used types at crate root
pub use error::{IsingError, Result};
pub use lattice::{delta_energy_if_flipped, energy_per_site, magnetization_per_site, total_energy, Lattice};
pub use sampling::{sample_at, Accumulator, Metropolis, Observables, ScanResults, SpinUpdate, SweepStats, TemperatureScan};
pub use io::{ScanReport, SimulationConfig, TemperatureSeries};
