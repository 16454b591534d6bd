//! Temperature scan driver.
//!
//! One lattice is carried through the whole series: every temperature starts from the
//! configuration left behind by the previous one, is equilibrated with a burn-in sweep
//! and then measured.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::error::{check_temperature, IsingError, Result};
use crate::io::SimulationConfig;
use crate::lattice::Lattice;
use super::metropolis::Metropolis;
use super::observables::{sample_at, Observables};

/// Per-temperature observables as parallel sequences aligned with `temperatures`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResults {
    pub temperatures: Vec<f64>,
    pub energy: Vec<f64>,
    pub magnetization: Vec<f64>,
    pub specific_heat: Vec<f64>,
    pub susceptibility: Vec<f64>,
    pub acceptance_rate: Vec<f64>,
}

impl ScanResults {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            temperatures: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
            magnetization: Vec::with_capacity(n),
            specific_heat: Vec::with_capacity(n),
            susceptibility: Vec::with_capacity(n),
            acceptance_rate: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, obs: &Observables) {
        self.temperatures.push(obs.temperature);
        self.energy.push(obs.energy);
        self.magnetization.push(obs.magnetization);
        self.specific_heat.push(obs.specific_heat);
        self.susceptibility.push(obs.susceptibility);
        self.acceptance_rate.push(obs.acceptance_rate);
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Observables> {
        if index >= self.len() {
            return None;
        }
        Some(Observables {
            temperature: self.temperatures[index],
            energy: self.energy[index],
            magnetization: self.magnetization[index],
            specific_heat: self.specific_heat[index],
            susceptibility: self.susceptibility[index],
            acceptance_rate: self.acceptance_rate[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Observables> + '_ {
        (0..self.len()).filter_map(move |k| self.get(k))
    }
}

/// Check that a temperature series is non-empty, positive and ascending.
pub fn validate_temperatures(temperatures: &[f64]) -> Result<()> {
    if temperatures.is_empty() {
        return Err(IsingError::InvalidConfiguration(
            "temperature series is empty".to_string(),
        ));
    }
    for &t in temperatures {
        check_temperature(t)?;
    }
    if let Some(w) = temperatures.windows(2).find(|w| w[1] < w[0]) {
        return Err(IsingError::InvalidConfiguration(format!(
            "temperature series must be ascending, found {} after {}",
            w[1], w[0]
        )));
    }
    Ok(())
}

/// Metropolis scan over an ascending temperature series.
pub struct TemperatureScan<R: Rng> {
    lattice: Lattice,
    metropolis: Metropolis<R>,
    moves_per_temperature: usize,
}

impl<R: Rng> TemperatureScan<R> {
    /// Random `size` x `size` lattice drawn from the head of `rng`'s stream.
    pub fn new(size: usize, moves_per_temperature: usize, mut rng: R) -> Result<Self> {
        let lattice = Lattice::random(size, &mut rng)?;
        Self::with_lattice(lattice, moves_per_temperature, rng)
    }

    pub fn from_config(config: &SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Self::new(config.lattice_size, config.moves_per_temperature(), rng)
    }

    /// Continue from an existing configuration.
    pub fn with_lattice(lattice: Lattice, moves_per_temperature: usize, rng: R) -> Result<Self> {
        if moves_per_temperature == 0 {
            return Err(IsingError::InvalidConfiguration(
                "moves per temperature must be positive".to_string(),
            ));
        }
        Ok(Self {
            lattice,
            metropolis: Metropolis::new(rng),
            moves_per_temperature,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn moves_per_temperature(&self) -> usize {
        self.moves_per_temperature
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    /// Scan `temperatures` in order. The whole series is validated up front, so a bad
    /// entry aborts the scan before the lattice changes.
    pub fn run(&mut self, temperatures: &[f64]) -> Result<ScanResults> {
        validate_temperatures(temperatures)?;
        info!(
            "Scanning {} temperatures on a {}x{} lattice, {} moves per temperature",
            temperatures.len(),
            self.lattice.size(),
            self.lattice.size(),
            self.moves_per_temperature
        );

        let mut results = ScanResults::with_capacity(temperatures.len());
        for (index, &t) in temperatures.iter().enumerate() {
            let obs = self.run_temperature(t)?;
            debug!(
                "[{}/{}] T = {:.4}  E = {:.6}  M = {:.6}  C_v = {:.6}",
                index + 1,
                temperatures.len(),
                t,
                obs.energy,
                obs.magnetization,
                obs.specific_heat
            );
            results.push(&obs);
        }
        Ok(results)
    }

    /// Burn in at `temperature`, then measure with as many single-move samples.
    pub fn run_temperature(&mut self, temperature: f64) -> Result<Observables> {
        let n = self.moves_per_temperature;
        let burn_in = self.metropolis.sweep(&mut self.lattice, temperature, n)?;
        debug!("Burn-in acceptance at T = {:.4}: {:.3}", temperature, burn_in.acceptance_rate());
        sample_at(&mut self.metropolis, &mut self.lattice, temperature, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tracing::Level;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs<F: FnOnce()>(level: Level, f: F) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_validate_temperatures() {
        assert!(validate_temperatures(&[1.6, 2.0, 2.0, 3.2]).is_ok());
        assert!(validate_temperatures(&[]).is_err());
        assert!(validate_temperatures(&[2.0, 1.0]).is_err());
        assert!(validate_temperatures(&[0.0, 1.0]).is_err());
        assert!(validate_temperatures(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_zero_moves_rejected() {
        let rng = StdRng::seed_from_u64(0);
        assert!(TemperatureScan::new(4, 0, rng).is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        let rng = StdRng::seed_from_u64(0);
        assert!(TemperatureScan::new(0, 10, rng).is_err());
    }

    #[test]
    fn test_invalid_series_leaves_lattice_untouched() {
        let mut scan = TemperatureScan::new(5, 250, StdRng::seed_from_u64(1)).unwrap();
        let snapshot = scan.lattice().clone();
        assert!(scan.run(&[]).is_err());
        assert!(scan.run(&[1.0, 2.0, -3.0]).is_err());
        assert!(scan.run(&[3.0, 2.0]).is_err());
        assert_eq!(scan.lattice(), &snapshot);
    }

    #[test]
    fn test_results_aligned_with_series() {
        let temperatures = [1.5, 2.0, 2.5, 3.0];
        let mut scan = TemperatureScan::new(4, 16 * 50, StdRng::seed_from_u64(2)).unwrap();
        let results = scan.run(&temperatures).unwrap();

        assert_eq!(results.len(), temperatures.len());
        assert_eq!(results.temperatures, temperatures.to_vec());
        assert_eq!(results.energy.len(), 4);
        assert_eq!(results.magnetization.len(), 4);
        assert_eq!(results.specific_heat.len(), 4);
        for (obs, &t) in results.iter().zip(temperatures.iter()) {
            assert_eq!(obs.temperature, t);
            assert!(obs.energy.abs() <= 4.0);
            assert!((0.0..=1.0).contains(&obs.magnetization));
            assert!(obs.specific_heat >= 0.0);
        }
        assert!(results.get(4).is_none());
    }

    #[test]
    fn test_per_temperature_lines_are_debug_only() {
        let run = || {
            let mut scan = TemperatureScan::new(4, 16 * 5, StdRng::seed_from_u64(8)).unwrap();
            scan.run(&[2.0, 2.5]).unwrap();
        };

        let info = capture_logs(Level::INFO, run);
        assert_eq!(info.matches("Scanning 2 temperatures").count(), 1);
        assert!(!info.contains("[1/2]"));

        let debug = capture_logs(Level::DEBUG, run);
        assert_eq!(debug.matches("[1/2]").count(), 1);
        assert_eq!(debug.matches("[2/2]").count(), 1);
    }

    #[test]
    fn test_lattice_evolves_across_temperatures() {
        let mut scan = TemperatureScan::new(6, 36 * 20, StdRng::seed_from_u64(3)).unwrap();
        let start = scan.lattice().clone();
        scan.run(&[5.0]).unwrap();
        assert_ne!(scan.lattice(), &start);
        assert!(scan.lattice().spins().iter().all(|&s| s == 1 || s == -1));
    }
}
