//! Lattice module - spin configuration and its energy on a periodic square lattice.

mod spins;
mod energy;

pub use spins::Lattice;
pub use energy::{
    delta_energy_if_flipped, energy_per_site, magnetization_per_site, neighbors, total_energy,
};
