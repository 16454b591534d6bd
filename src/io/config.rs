use std::fs;
use std::path::Path;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use crate::error::{IsingError, Result};
use crate::sampling::validate_temperatures;

/// Run configuration for a temperature scan.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Lattice width L (the lattice is L x L)
    pub lattice_size: usize,
    /// External field strength B. Recorded with the results but not coupled to the spins.
    #[serde(default)]
    pub field_strength: f64,
    /// Metropolis moves per site at each temperature; the move count is this times L²
    #[serde(default = "default_moves_per_site")]
    pub moves_per_site: usize,
    /// Seed for the random stream; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub temperatures: TemperatureSeries,
}

/// Temperatures to scan, either listed or as an arange-style range.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TemperatureSeries {
    Explicit(Vec<f64>),
    /// `start, start + step, ...` strictly below `stop`
    Range { start: f64, stop: f64, step: f64 },
}

/// Upper bound on the number of temperatures a range may expand to.
const MAX_TEMPERATURES: usize = 1_000_000;

fn default_moves_per_site() -> usize {
    100
}

impl TemperatureSeries {
    pub fn values(&self) -> Result<Vec<f64>> {
        let values = match *self {
            TemperatureSeries::Explicit(ref values) => values.clone(),
            TemperatureSeries::Range { start, stop, step } => {
                if !(step.is_finite() && step > 0.0) {
                    return Err(IsingError::InvalidConfiguration(format!(
                        "temperature step must be positive, got {}",
                        step
                    )));
                }
                if !(start.is_finite() && stop.is_finite()) || stop <= start {
                    return Err(IsingError::InvalidConfiguration(format!(
                        "temperature range [{}, {}) is empty",
                        start, stop
                    )));
                }
                let count = ((stop - start) / step).ceil();
                if !count.is_finite() || count > MAX_TEMPERATURES as f64 {
                    return Err(IsingError::InvalidConfiguration(format!(
                        "temperature range [{}, {}) with step {} exceeds {} points",
                        start, stop, step, MAX_TEMPERATURES
                    )));
                }
                let n = count as usize;
                (0..n).map(|k| start + k as f64 * step).collect()
            }
        };
        validate_temperatures(&values)?;
        Ok(values)
    }
}

impl SimulationConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SimulationConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.lattice_size == 0 {
            return Err(IsingError::InvalidConfiguration(
                "lattice size must be at least 1".to_string(),
            ));
        }
        if self.moves_per_site == 0 {
            return Err(IsingError::InvalidConfiguration(
                "moves per site must be positive".to_string(),
            ));
        }
        let total = self
            .lattice_size
            .checked_mul(self.lattice_size)
            .and_then(|n| n.checked_mul(self.moves_per_site));
        if total.is_none() {
            return Err(IsingError::InvalidConfiguration(format!(
                "{} moves per site overflows on a {}x{} lattice",
                self.moves_per_site, self.lattice_size, self.lattice_size
            )));
        }
        if !self.field_strength.is_finite() {
            return Err(IsingError::InvalidConfiguration(
                "field strength must be finite".to_string(),
            ));
        }
        self.temperatures.values()?;
        Ok(())
    }

    pub fn n_sites(&self) -> usize {
        self.lattice_size * self.lattice_size
    }

    /// Metropolis moves spent on burn-in, and again on measurement, per temperature.
    pub fn moves_per_temperature(&self) -> usize {
        self.moves_per_site * self.n_sites()
    }

    pub fn temperature_values(&self) -> Result<Vec<f64>> {
        self.temperatures.values()
    }

    /// Random stream for the run, seeded when `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
