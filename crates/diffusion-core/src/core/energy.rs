use super::density::{DensityError, RawEntry, counts_from_integers, integers_from_raw};

/// A pure scoring function over particle-count vectors; lower is more favourable.
///
/// Implementations must be deterministic, free of side effects, and return exactly `0.0`
/// for an all-zero vector of any length. Any `Fn(&[u64]) -> f64` closure qualifies.
pub trait EnergyFunctional {
    fn energy(&self, density: &[u64]) -> f64;
}

impl<F> EnergyFunctional for F
where
    F: Fn(&[u64]) -> f64,
{
    #[inline]
    fn energy(&self, density: &[u64]) -> f64 {
        self(density)
    }
}

/// Pairwise on-site repulsion: `E = c * 1/2 * sum(n_i * (n_i - 1))`.
///
/// Lone particles contribute nothing, so spreading particles out lowers the energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionEnergy {
    coefficient: f64,
}

impl DiffusionEnergy {
    pub const DEFAULT_COEFFICIENT: f64 = 1.0;

    pub fn new() -> Self {
        Self::with_coefficient(Self::DEFAULT_COEFFICIENT)
    }

    pub fn with_coefficient(coefficient: f64) -> Self {
        Self { coefficient }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

impl Default for DiffusionEnergy {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyFunctional for DiffusionEnergy {
    fn energy(&self, density: &[u64]) -> f64 {
        let pairs: f64 = density
            .iter()
            .map(|&n| (n as f64) * (n.saturating_sub(1) as f64))
            .sum();
        self.coefficient * 0.5 * pairs
    }
}

/// Validates an untyped density and evaluates [`DiffusionEnergy`] on it.
///
/// Unlike [`DensityState`](super::density::DensityState), any length is accepted here,
/// including the empty sequence, and an all-zero density is fine.
pub fn energy_of_raw(entries: &[RawEntry], coefficient: f64) -> Result<f64, DensityError> {
    let integers = integers_from_raw(entries)?;
    let counts = counts_from_integers(&integers)?;
    Ok(DiffusionEnergy::with_coefficient(coefficient).energy(&counts))
}
