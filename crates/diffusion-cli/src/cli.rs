use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "diffuse - Metropolis Monte Carlo simulation of particles diffusing on a one-dimensional line.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Monte Carlo diffusion simulation and print the final state.
    Run(RunArgs),
    /// Evaluate the diffusion energy of a density without simulating.
    Energy(EnergyArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// The full result, including recorded frames, as JSON.
    Json,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Simulation Overrides ---
    /// Override the simulation temperature. Must be positive.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Override the number of Monte Carlo steps.
    #[arg(short = 'n', long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Seed the random number generator for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    // --- Model Overrides ---
    /// Initial density as a comma-separated list of particle counts (e.g., '0,0,3,5,8').
    #[arg(short, long, value_name = "LIST", allow_hyphen_values = true)]
    pub density: Option<String>,

    /// Override the energy coefficient.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub coefficient: Option<f64>,

    // --- Output ---
    /// Record a frame every N steps (included in JSON output).
    #[arg(long, value_name = "INT")]
    pub frame_interval: Option<usize>,

    /// Output format for the final result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S simulation.temperature=0.1
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Density as a comma-separated list of particle counts. Any length is accepted.
    #[arg(short, long, value_name = "LIST", allow_hyphen_values = true)]
    pub density: String,

    /// Energy coefficient.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0, allow_negative_numbers = true)]
    pub coefficient: f64,
}
