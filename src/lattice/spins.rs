use nalgebra::DMatrix;
use rand::Rng;
use crate::error::{IsingError, Result};

/// Square L x L lattice of Ising spins.
///
/// Every cell holds exactly +1 or -1. Spins are stored as an `i8` matrix indexed by
/// (row, column); the lattice itself performs no periodic wrapping, see
/// [`neighbors`](super::neighbors) for that.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: usize,
    spins: DMatrix<i8>,
}

impl Lattice {
    /// Random configuration: every spin an independent fair coin flip.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        check_size(size)?;
        let spins = DMatrix::from_fn(size, size, |_, _| if rng.gen::<bool>() { 1 } else { -1 });
        Ok(Self { size, spins })
    }

    /// All spins up.
    pub fn ordered(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self { size, spins: DMatrix::from_element(size, size, 1) })
    }

    /// Build a lattice from row-major spin values.
    pub fn from_spins(size: usize, values: &[i8]) -> Result<Self> {
        check_size(size)?;
        if values.len() != size * size {
            return Err(IsingError::InvalidConfiguration(format!(
                "expected {} spins for a {}x{} lattice, got {}",
                size * size,
                size,
                size,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|&&s| s != 1 && s != -1) {
            return Err(IsingError::InvalidConfiguration(format!(
                "spin values must be +1 or -1, got {}",
                bad
            )));
        }
        Ok(Self { size, spins: DMatrix::from_row_slice(size, size, values) })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Spin at row `i`, column `j`. Both indices must lie in `[0, size)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i8 {
        self.spins[(i, j)]
    }

    #[inline]
    pub fn flip(&mut self, i: usize, j: usize) {
        self.spins[(i, j)] = -self.spins[(i, j)];
    }

    /// Signed sum of all spins.
    pub fn total_spin(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub fn spins(&self) -> &DMatrix<i8> {
        &self.spins
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(IsingError::InvalidConfiguration(
            "lattice size must be at least 1".to_string(),
        ));
    }
    Ok(())
}
