mod defaults;
mod models;

pub use defaults::DefaultsConfig;
pub use models::RunConfig;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use diffusion_mc::core::profiles::DensityProfile;
use diffusion_mc::engine::config::SimulationConfigBuilder;
use diffusion_mc::workflows::simulate::SimulateOptions;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSimulationConfig {
    temperature: Option<f64>,
    iterations: Option<usize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnergyConfig {
    coefficient: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    #[serde(rename = "frame-interval")]
    frame_interval: Option<usize>,
}

/// The `run` settings as read from a TOML file, before command-line overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    simulation: Option<PartialSimulationConfig>,
    energy: Option<PartialEnergyConfig>,
    density: Option<DensityProfile>,
    output: Option<PartialOutputConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts from an empty configuration.
    pub fn load(args: &RunArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting with precedence: flag, then `--set`, then file, then default.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<RunConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let sim = self.simulation.take().unwrap_or_default();
        let energy = self.energy.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let simulation = SimulationConfigBuilder::new()
            .temperature(
                args.temperature
                    .or(sim.temperature)
                    .unwrap_or(defaults.temperature),
            )
            .iteration_limit(
                args.iterations
                    .or(sim.iterations)
                    .unwrap_or(defaults.iterations),
            )
            .seed(args.seed.or(sim.seed))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let density = match &args.density {
            Some(list) => DensityProfile::Explicit {
                values: parser::parse_density_list(list)
                    .map_err(|e| CliError::Argument(e.to_string()))?,
            },
            None => self.density.take().unwrap_or(defaults.density),
        };

        Ok(RunConfig {
            simulation,
            density,
            coefficient: args
                .coefficient
                .or(energy.coefficient)
                .unwrap_or(defaults.coefficient),
            options: SimulateOptions {
                frame_interval: args.frame_interval.or(output.frame_interval),
            },
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "simulation.temperature" => {
                    self.simulation
                        .get_or_insert_with(Default::default)
                        .temperature = Some(parse_value(key, value_str, "float")?);
                }
                "simulation.iterations" => {
                    self.simulation
                        .get_or_insert_with(Default::default)
                        .iterations = Some(parse_value(key, value_str, "integer")?);
                }
                "simulation.seed" => {
                    self.simulation.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str, "integer")?);
                }
                "energy.coefficient" => {
                    self.energy.get_or_insert_with(Default::default).coefficient =
                        Some(parse_value(key, value_str, "float")?);
                }
                "output.frame-interval" => {
                    self.output
                        .get_or_insert_with(Default::default)
                        .frame_interval = Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use diffusion_mc::core::density::RawEntry;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("diffuse.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["diffuse", "run"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            _ => panic!("Expected 'run' subcommand"),
        }
    }

    const FULL_CONFIG: &str = r#"
        [simulation]
        temperature = 0.1
        iterations = 5000
        seed = 42

        [energy]
        coefficient = 2.0

        [density]
        type = "uniform"
        length = 8
        count = 3

        [output]
        frame-interval = 100
    "#;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let args = run_args(&[]);
        let config = PartialRunConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.simulation.temperature, 1.0);
        assert_eq!(config.simulation.iteration_limit, 1_000);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.coefficient, 1.0);
        assert_eq!(config.density, DensityProfile::default());
        assert_eq!(config.options.frame_interval, None);
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, FULL_CONFIG);
        let args = run_args(&["-c", path.to_str().unwrap()]);

        let config = PartialRunConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.simulation.temperature, 0.1);
        assert_eq!(config.simulation.iteration_limit, 5_000);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.coefficient, 2.0);
        assert_eq!(
            config.density,
            DensityProfile::Uniform {
                length: 8,
                count: 3
            }
        );
        assert_eq!(config.options.frame_interval, Some(100));
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, FULL_CONFIG);
        let args = run_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "simulation.temperature=0.5",
            "-S",
            "simulation.iterations=10",
            "--temperature",
            "2.5",
            "--density",
            "0,4,0",
        ]);

        let config = PartialRunConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.simulation.temperature, 2.5);
        assert_eq!(config.simulation.iteration_limit, 10);
        assert_eq!(
            config.density,
            DensityProfile::Explicit {
                values: vec![RawEntry::Int(0), RawEntry::Int(4), RawEntry::Int(0)]
            }
        );
    }

    #[test]
    fn set_values_cover_every_supported_key() {
        let args = run_args(&[
            "-S",
            "simulation.seed=7",
            "-S",
            "energy.coefficient=0.5",
            "-S",
            "output.frame-interval=3",
        ]);
        let config = PartialRunConfig::default().merge_with_cli(&args).unwrap();

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.coefficient, 0.5);
        assert_eq!(config.options.frame_interval, Some(3));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["simulation.temperature", "simulation.iterations=many", "unknown.key=1"] {
            let args = run_args(&["-S", bad]);
            let result = PartialRunConfig::default().merge_with_cli(&args);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn unknown_file_fields_are_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[simulation]\ntemprature = 0.1\n");
        assert!(matches!(
            PartialRunConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn malformed_density_flag_is_an_argument_error() {
        let args = run_args(&["--density", "1,x"]);
        let result = PartialRunConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            PartialRunConfig::from_file(&missing),
            Err(CliError::Io(_))
        ));
    }
}
