//! Thermodynamic averages at a fixed temperature.
//!
//! Successive samples are a single trial move apart, so they are strongly correlated.
//! The cadence is kept as is: one move, one measurement.

use serde::{Deserialize, Serialize};
use crate::error::{check_temperature, IsingError, Result};
use crate::lattice::{energy_per_site, magnetization_per_site, Lattice};
use super::traits::SpinUpdate;

/// Equilibrium estimates at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observables {
    pub temperature: f64,
    /// Mean energy per site.
    pub energy: f64,
    /// Mean |magnetization| per site.
    pub magnetization: f64,
    pub specific_heat: f64,
    pub susceptibility: f64,
    /// Fraction of accepted moves during measurement.
    pub acceptance_rate: f64,
}

impl Observables {
    /// (energy, magnetization, specific heat)
    pub fn triple(&self) -> (f64, f64, f64) {
        (self.energy, self.magnetization, self.specific_heat)
    }
}

/// Running sums of per-site energy and magnetization and their squares.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    count: usize,
    energy: f64,
    energy_sq: f64,
    magnetization: f64,
    magnetization_sq: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, energy: f64, magnetization: f64) {
        self.count += 1;
        self.energy += energy;
        self.energy_sq += energy * energy;
        self.magnetization += magnetization;
        self.magnetization_sq += magnetization * magnetization;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Reduce the sums to averages and fluctuation estimates.
    ///
    /// C_V = (<E²> - <E>²) / T² and χ = (<M²> - <M>²) / T. Variances are clamped at zero
    /// so cancellation noise never yields a negative response function.
    pub fn reduce(&self, temperature: f64, acceptance_rate: f64) -> Result<Observables> {
        check_temperature(temperature)?;
        if self.count == 0 {
            return Err(IsingError::InvalidConfiguration(
                "cannot reduce an empty accumulator".to_string(),
            ));
        }

        let n = self.count as f64;
        let energy = self.energy / n;
        let magnetization = self.magnetization / n;
        let energy_var = (self.energy_sq / n - energy * energy).max(0.0);
        let magnetization_var = (self.magnetization_sq / n - magnetization * magnetization).max(0.0);

        Ok(Observables {
            temperature,
            energy,
            magnetization,
            specific_heat: energy_var / (temperature * temperature),
            susceptibility: magnetization_var / temperature,
            acceptance_rate,
        })
    }
}

/// Estimate observables at `temperature` from `n_samples` single-move samples.
///
/// Each iteration performs exactly one trial move and then measures the lattice.
pub fn sample_at<U: SpinUpdate + ?Sized>(
    updater: &mut U,
    lattice: &mut Lattice,
    temperature: f64,
    n_samples: usize,
) -> Result<Observables> {
    check_temperature(temperature)?;
    if n_samples == 0 {
        return Err(IsingError::InvalidConfiguration(
            "number of samples must be positive".to_string(),
        ));
    }

    let mut acc = Accumulator::new();
    let mut accepted = 0usize;
    for _ in 0..n_samples {
        if updater.trial_move(lattice, temperature) {
            accepted += 1;
        }
        acc.push(energy_per_site(lattice), magnetization_per_site(lattice));
    }

    acc.reduce(temperature, accepted as f64 / n_samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::sampling::Metropolis;

    /// Update rule that never moves, for checking the bookkeeping alone.
    struct Frozen;

    impl SpinUpdate for Frozen {
        fn trial_move(&mut self, _lattice: &mut Lattice, _temperature: f64) -> bool {
            false
        }
    }

    /// Flips a fixed site on every call.
    struct Toggle(usize, usize);

    impl SpinUpdate for Toggle {
        fn trial_move(&mut self, lattice: &mut Lattice, _temperature: f64) -> bool {
            lattice.flip(self.0, self.1);
            true
        }
    }

    #[test]
    fn test_accumulator_reduce() {
        let mut acc = Accumulator::new();
        acc.push(-2.0, 1.0);
        acc.push(-1.0, 0.5);
        acc.push(-3.0, 0.0);
        assert_eq!(acc.count(), 3);

        let obs = acc.reduce(2.0, 0.25).unwrap();
        assert_relative_eq!(obs.energy, -2.0, epsilon = 1e-12);
        assert_relative_eq!(obs.magnetization, 0.5, epsilon = 1e-12);
        // Var(E) = 2/3, T² = 4
        assert_relative_eq!(obs.specific_heat, 2.0 / 3.0 / 4.0, epsilon = 1e-12);
        // Var(M) = 1/6, T = 2
        assert_relative_eq!(obs.susceptibility, 1.0 / 6.0 / 2.0, epsilon = 1e-12);
        assert_eq!(obs.acceptance_rate, 0.25);
        assert_eq!(obs.temperature, 2.0);
    }

    #[test]
    fn test_reduce_matches_fluctuation_formula() {
        let energies = [-3.84, -3.92, -3.6, -4.0, -3.76, -3.88];
        let mags = [0.94, 0.98, 0.86, 1.0, 0.9, 0.96];
        let mut acc = Accumulator::new();
        for (&e, &m) in energies.iter().zip(mags.iter()) {
            acc.push(e, m);
        }

        let n = energies.len() as f64;
        let t = 1.7;
        let avg_e = energies.iter().sum::<f64>() / n;
        let avg_m = mags.iter().sum::<f64>() / n;
        let cv = (energies.iter().map(|e| e * e).sum::<f64>() / n - avg_e * avg_e) / (t * t);
        let chi = (mags.iter().map(|m| m * m).sum::<f64>() / n - avg_m * avg_m) / t;
        assert!(cv > 0.0 && chi > 0.0);

        let obs = acc.reduce(t, 0.5).unwrap();
        assert_relative_eq!(obs.specific_heat, cv, epsilon = 1e-12);
        assert_relative_eq!(obs.susceptibility, chi, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_samples_never_negative() {
        let mut acc = Accumulator::new();
        for _ in 0..1000 {
            acc.push(-3.7, 0.3);
        }
        let obs = acc.reduce(2.3, 0.0).unwrap();
        assert!(obs.specific_heat >= 0.0 && obs.specific_heat < 1e-12);
        assert!(obs.susceptibility >= 0.0 && obs.susceptibility < 1e-12);
    }

    #[test]
    fn test_empty_accumulator_rejected() {
        assert!(Accumulator::new().reduce(1.0, 0.0).is_err());
    }

    #[test]
    fn test_frozen_lattice_has_no_fluctuations() {
        let mut lattice = Lattice::ordered(4).unwrap();
        let obs = sample_at(&mut Frozen, &mut lattice, 1.5, 100).unwrap();
        assert_relative_eq!(obs.energy, -4.0, epsilon = 1e-12);
        assert_relative_eq!(obs.magnetization, 1.0, epsilon = 1e-12);
        assert_eq!(obs.specific_heat, 0.0);
        assert_eq!(obs.susceptibility, 0.0);
        assert_eq!(obs.acceptance_rate, 0.0);
    }

    #[test]
    fn test_measurement_follows_each_move() {
        // The lattice alternates between aligned (E = -4, M = 1) and one flipped spin
        // (E = -4 + 16/9, M = 7/9), starting with the flipped state.
        let mut lattice = Lattice::ordered(3).unwrap();
        let obs = sample_at(&mut Toggle(0, 0), &mut lattice, 1.0, 4).unwrap();

        let e_flipped = -4.0 + 16.0 / 9.0;
        assert_relative_eq!(obs.energy, (-4.0 + e_flipped) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(obs.magnetization, (1.0 + 7.0 / 9.0) / 2.0, epsilon = 1e-12);
        let spread = (e_flipped + 4.0) / 2.0;
        assert_relative_eq!(obs.specific_heat, spread * spread, epsilon = 1e-12);
        assert_eq!(obs.acceptance_rate, 1.0);
        assert_eq!(lattice, Lattice::ordered(3).unwrap());
    }

    #[test]
    fn test_invalid_arguments_leave_lattice_untouched() {
        let mut mc = Metropolis::new(StdRng::seed_from_u64(9));
        let mut lattice = Lattice::random(5, mc.rng_mut()).unwrap();
        let snapshot = lattice.clone();

        assert!(sample_at(&mut mc, &mut lattice, 0.0, 10).is_err());
        assert!(sample_at(&mut mc, &mut lattice, 2.0, 0).is_err());
        assert_eq!(lattice, snapshot);
    }

    #[test]
    fn test_observables_physically_bounded() {
        let mut mc = Metropolis::new(StdRng::seed_from_u64(10));
        let mut lattice = Lattice::random(6, mc.rng_mut()).unwrap();
        for &t in &[1.5, 2.3, 3.5] {
            let obs = sample_at(&mut mc, &mut lattice, t, 5_000).unwrap();
            assert!(obs.energy.abs() <= 4.0);
            assert!((0.0..=1.0).contains(&obs.magnetization));
            assert!(obs.specific_heat >= 0.0);
            assert!(obs.susceptibility >= 0.0);
            assert!((0.0..=1.0).contains(&obs.acceptance_rate));
        }
    }

    #[test]
    fn test_triple() {
        let mut lattice = Lattice::ordered(2).unwrap();
        let obs = sample_at(&mut Frozen, &mut lattice, 1.0, 3).unwrap();
        assert_eq!(obs.triple(), (obs.energy, obs.magnetization, obs.specific_heat));
    }
}
