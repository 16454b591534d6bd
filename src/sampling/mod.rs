//! Sampling module - Metropolis Monte Carlo for the Ising lattice.

mod traits;
mod metropolis;
mod observables;
mod scan;

pub use traits::SpinUpdate;
pub use metropolis::{Metropolis, SweepStats};
pub use observables::{sample_at, Accumulator, Observables};
pub use scan::{validate_temperatures, ScanResults, TemperatureScan};
