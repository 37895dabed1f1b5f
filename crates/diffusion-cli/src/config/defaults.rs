use diffusion_mc::core::energy::DiffusionEnergy;
use diffusion_mc::core::profiles::DensityProfile;

/// Values used when neither the command line nor the config file sets them.
pub struct DefaultsConfig {
    pub temperature: f64,
    pub iterations: usize,
    pub coefficient: f64,
    pub density: DensityProfile,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            iterations: 1_000,
            coefficient: DiffusionEnergy::DEFAULT_COEFFICIENT,
            density: DensityProfile::default(),
        }
    }
}
