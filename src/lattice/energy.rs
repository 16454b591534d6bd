//! Nearest-neighbour energetics with periodic boundaries.
//!
//! Coupling J = 1, no field term. The flip energy is the physical one,
//! `2 s_ij Σ_nbr s`. The lattice energy is reported as `Σ_ij -ΔE_ij / 2 = -Σ_ij s_ij Σ_nbr s`,
//! which visits every bond from both of its ends: a fully aligned lattice sits at -4 per
//! site and the Boltzmann weight of a configuration is `exp(-total_energy / 2T)`.

use super::Lattice;

/// Wrapped neighbour coordinates of `(i, j)`, ordered top, bottom, left, right.
#[inline]
pub fn neighbors(lattice: &Lattice, i: usize, j: usize) -> [(usize, usize); 4] {
    let l = lattice.size();
    let up = if i == 0 { l - 1 } else { i - 1 };
    let down = if i == l - 1 { 0 } else { i + 1 };
    let left = if j == 0 { l - 1 } else { j - 1 };
    let right = if j == l - 1 { 0 } else { j + 1 };
    [(up, j), (down, j), (i, left), (i, right)]
}

/// Energy change if spin `(i, j)` were flipped.
#[inline]
pub fn delta_energy_if_flipped(lattice: &Lattice, i: usize, j: usize) -> i32 {
    let n_sum: i32 = neighbors(lattice, i, j)
        .iter()
        .map(|&(ni, nj)| lattice.get(ni, nj) as i32)
        .sum();
    2 * lattice.get(i, j) as i32 * n_sum
}

pub fn total_energy(lattice: &Lattice) -> f64 {
    let l = lattice.size();
    let mut energy = 0.0;
    for i in 0..l {
        for j in 0..l {
            energy += -(delta_energy_if_flipped(lattice, i, j) as f64) / 2.0;
        }
    }
    energy
}

pub fn energy_per_site(lattice: &Lattice) -> f64 {
    total_energy(lattice) / lattice.n_sites() as f64
}

/// |Σ s| / L², always within [0, 1].
pub fn magnetization_per_site(lattice: &Lattice) -> f64 {
    lattice.total_spin().abs() as f64 / lattice.n_sites() as f64
}
