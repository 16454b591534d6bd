//! Single-spin-flip Metropolis dynamics.
//!
//! A site is drawn uniformly, and flipping it is accepted with probability
//! `min(1, exp(-ΔE / T))` (k_B = 1). Every accepted flip is permanent.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::debug;
use crate::error::{check_temperature, Result};
use crate::lattice::{delta_energy_if_flipped, Lattice};
use super::traits::SpinUpdate;

/// Move counts of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub attempted: usize,
    pub accepted: usize,
}

impl SweepStats {
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempted as f64
    }
}

/// Metropolis update rule owning its random stream.
pub struct Metropolis<R: Rng> {
    rng: R,
}

impl<R: Rng> Metropolis<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Run `steps` trial moves against `lattice` at `temperature`.
    ///
    /// The temperature is checked before the lattice or the random stream is touched.
    pub fn sweep(&mut self, lattice: &mut Lattice, temperature: f64, steps: usize) -> Result<SweepStats> {
        check_temperature(temperature)?;

        let site = Uniform::new(0, lattice.size());
        let mut stats = SweepStats { attempted: steps, accepted: 0 };
        for _ in 0..steps {
            if self.step(lattice, &site, temperature) {
                stats.accepted += 1;
            }
        }

        debug!(
            "Sweep at T = {:.4}: {} / {} moves accepted ({:.3})",
            temperature,
            stats.accepted,
            stats.attempted,
            stats.acceptance_rate()
        );
        Ok(stats)
    }

    fn step(&mut self, lattice: &mut Lattice, site: &Uniform<usize>, temperature: f64) -> bool {
        let i = site.sample(&mut self.rng);
        let j = site.sample(&mut self.rng);
        let ediff = delta_energy_if_flipped(lattice, i, j);

        if self.accept(ediff, temperature) {
            lattice.flip(i, j);
            true
        } else {
            false
        }
    }

    /// Metropolis criterion. Downhill and neutral moves never consume a random number.
    fn accept(&mut self, ediff: i32, temperature: f64) -> bool {
        if ediff <= 0 {
            return true;
        }
        // exp underflows to 0 for huge ediff / T, which simply rejects.
        self.rng.gen::<f64>() < (-(ediff as f64) / temperature).exp()
    }
}

impl<R: Rng> SpinUpdate for Metropolis<R> {
    fn trial_move(&mut self, lattice: &mut Lattice, temperature: f64) -> bool {
        let site = Uniform::new(0, lattice.size());
        self.step(lattice, &site, temperature)
    }
}
