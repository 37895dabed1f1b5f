use super::config::Temperature;
use rand::Rng;

/// The Boltzmann factor `exp(-delta / T)` for an energy increase `delta`.
#[inline]
pub fn boltzmann_factor(delta: f64, temperature: Temperature) -> f64 {
    (-delta / temperature.value()).exp()
}

pub trait AcceptanceRule {
    fn decide<R: Rng>(
        &mut self,
        current: f64,
        candidate: f64,
        temperature: Temperature,
        rng: &mut R,
    ) -> bool;
}

/// Accepts every move that does not raise the energy; otherwise accepts with probability
/// equal to the Boltzmann factor of the increase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metropolis;

impl Metropolis {
    pub fn new() -> Self {
        Self
    }
}

impl AcceptanceRule for Metropolis {
    fn decide<R: Rng>(
        &mut self,
        current: f64,
        candidate: f64,
        temperature: Temperature,
        rng: &mut R,
    ) -> bool {
        if candidate <= current {
            return true;
        }
        rng.r#gen::<f64>() < boltzmann_factor(candidate - current, temperature)
    }
}
