use crate::cli::{OutputFormat, RunArgs};
use crate::config::{PartialRunConfig, RunConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use diffusion_mc::core::energy::DiffusionEnergy;
use diffusion_mc::engine::progress::ProgressReporter;
use diffusion_mc::workflows::simulate::{self, SimulationResult};
use tracing::info;

/// Builds the initial density and runs the simulation workflow for `config`.
pub fn execute(config: &RunConfig, reporter: &ProgressReporter) -> Result<SimulationResult> {
    let initial = config.density.build()?;
    info!(
        positions = initial.len(),
        particles = initial.total(),
        "Initial density built."
    );

    let energy_model = DiffusionEnergy::with_coefficient(config.coefficient);
    let result = simulate::run(
        initial,
        energy_model,
        &config.simulation,
        &config.options,
        reporter,
    )?;
    Ok(result)
}

pub fn render_text(result: &SimulationResult) -> String {
    let acceptance = match result.statistics.acceptance_rate() {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    };
    format!(
        "Initial energy: {:.4}\nFinal energy:   {:.4}\nFinal density:  {}\nAcceptance:     {}\nSeed:           {}",
        result.initial_energy,
        result.solution.energy,
        result.solution.density,
        acceptance,
        result.seed
    )
}

pub fn run(args: RunArgs, show_progress: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = PartialRunConfig::load(&args)?.merge_with_cli(&args)?;

    let reporter = if show_progress {
        ProgressReporter::with_callback(CliProgressHandler::new().get_callback())
    } else {
        ProgressReporter::new()
    };

    let result = execute(&config, &reporter)?;

    match args.format {
        OutputFormat::Text => println!("{}", render_text(&result)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).map_err(|e| CliError::Other(e.into()))?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffusion_mc::core::density::{DensityError, RawEntry};
    use diffusion_mc::core::profiles::DensityProfile;
    use diffusion_mc::engine::config::SimulationConfigBuilder;
    use diffusion_mc::engine::error::EngineError;
    use diffusion_mc::workflows::simulate::SimulateOptions;

    fn config(density: Vec<i64>, temperature: f64, frame_interval: Option<usize>) -> RunConfig {
        RunConfig {
            simulation: SimulationConfigBuilder::new()
                .temperature(temperature)
                .iteration_limit(200)
                .seed(Some(3))
                .build()
                .unwrap(),
            density: DensityProfile::Explicit {
                values: density.into_iter().map(RawEntry::Int).collect(),
            },
            coefficient: 1.0,
            options: SimulateOptions { frame_interval },
        }
    }

    #[test]
    fn execute_runs_a_seeded_simulation() {
        let result = execute(
            &config(vec![0, 0, 3, 5, 8, 4, 2, 1], 0.1, None),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.seed, 3);
        assert_eq!(result.initial_energy, 48.0);
        assert_eq!(result.solution.density.total(), 23);
        assert_eq!(result.statistics.steps(), 200);
    }

    #[test]
    fn invalid_density_is_reported_before_simulating() {
        let err = execute(&config(vec![4], 1.0, None), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Density(DensityError::TooShort { len: 1 })
        ));
    }

    #[test]
    fn overflowing_uniform_profile_is_a_density_error() {
        let mut overflowing = config(vec![1, 1], 1.0, None);
        overflowing.density = DensityProfile::Uniform {
            length: 3,
            count: 9_223_372_036_854_775_807,
        };
        let err = execute(&overflowing, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Density(DensityError::TooManyParticles)
        ));
    }

    #[test]
    fn zero_temperature_is_an_engine_error() {
        let err = execute(&config(vec![1, 1], 0.0, None), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, CliError::Engine(EngineError::ZeroTemperature)));
    }

    #[test]
    fn text_summary_lists_energy_density_and_seed() {
        let result = execute(&config(vec![2, 0, 0], 1.0, None), &ProgressReporter::new()).unwrap();
        let text = render_text(&result);
        assert!(text.contains("Initial energy: 1.0000"));
        assert!(text.contains(&format!("Final density:  {}", result.solution.density)));
        assert!(text.ends_with("Seed:           3"));
    }

    #[test]
    fn json_output_includes_frames() {
        let result = execute(
            &config(vec![0, 6, 0, 0], 1.0, Some(50)),
            &ProgressReporter::new(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["seed"], 3);
        assert_eq!(value["frames"].as_array().unwrap().len(), 5);
        assert_eq!(value["frames"][0]["density"], serde_json::json!([0, 6, 0, 0]));
        assert!(value["solution"]["density"].is_array());
    }
}
