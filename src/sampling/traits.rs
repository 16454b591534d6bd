//! Traits for Monte Carlo sampling.

use crate::lattice::Lattice;

/// Single-site update rule driving a lattice towards equilibrium.
pub trait SpinUpdate {
    /// Attempt one elementary move at `temperature`, returning whether a spin flipped.
    ///
    /// `temperature` has already been checked to be finite and positive.
    fn trial_move(&mut self, lattice: &mut Lattice, temperature: f64) -> bool;
}
