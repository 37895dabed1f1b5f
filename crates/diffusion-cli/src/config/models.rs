use diffusion_mc::core::profiles::DensityProfile;
use diffusion_mc::engine::config::SimulationConfig;
use diffusion_mc::workflows::simulate::SimulateOptions;

/// Fully merged settings for one `run` invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub density: DensityProfile,
    pub coefficient: f64,
    pub options: SimulateOptions,
}
