use crate::core::density::DensityState;
use crate::core::energy::EnergyFunctional;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::Simulation;
use crate::engine::state::{RunStatistics, Solution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, instrument};

/// Number of progress increments reported over a whole run.
const PROGRESS_UPDATES: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulateOptions {
    /// Record a [`Frame`] every this many steps. `None` records nothing.
    pub frame_interval: Option<usize>,
}

/// A snapshot of the simulation for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: usize,
    pub energy: f64,
    pub density: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub seed: u64,
    pub initial_energy: f64,
    pub solution: Solution,
    pub statistics: RunStatistics,
    pub frames: Vec<Frame>,
}

/// Runs a complete seeded simulation.
///
/// The generator is a `ChaCha8Rng` seeded from `config.seed`, or from a fresh random seed
/// that is reported back in the result so the run can be replayed.
#[instrument(skip_all, name = "simulate_workflow")]
pub fn run<E: EnergyFunctional>(
    initial: DensityState,
    energy_model: E,
    config: &SimulationConfig,
    options: &SimulateOptions,
    reporter: &ProgressReporter,
) -> Result<SimulationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparing Simulation",
    });
    let seed = config
        .seed
        .unwrap_or_else(|| rand::thread_rng().r#gen::<u64>());
    info!(seed, "Seeding random number generator.");

    let mut simulation =
        Simulation::new(energy_model, initial, config, ChaCha8Rng::seed_from_u64(seed))?;
    let initial_energy = simulation.energy();
    info!(
        positions = simulation.density().len(),
        particles = simulation.density().total(),
        temperature = config.temperature,
        iterations = config.iteration_limit,
        initial_energy,
        "Simulation prepared."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Monte Carlo",
    });
    reporter.report(Progress::TaskStart {
        total: config.iteration_limit as u64,
    });

    let frame_interval = options.frame_interval.filter(|&n| n > 0);
    let mut frames = Vec::new();
    if frame_interval.is_some() {
        frames.push(Frame {
            step: 0,
            energy: initial_energy,
            density: simulation.density().to_vec(),
        });
    }

    let stride = (config.iteration_limit / PROGRESS_UPDATES).max(1);
    let mut pending = 0u64;
    while simulation.remaining() > 0 {
        let outcome = simulation.step()?;

        if let Some(interval) = frame_interval {
            if outcome.step % interval == 0 {
                frames.push(Frame {
                    step: outcome.step,
                    energy: outcome.energy,
                    density: simulation.density().to_vec(),
                });
            }
        }

        pending += 1;
        if reporter.is_active() && (outcome.step % stride == 0 || simulation.remaining() == 0) {
            reporter.report(Progress::TaskIncrement { amount: pending });
            reporter.report(Progress::Energy {
                step: outcome.step as u64,
                energy: outcome.energy,
            });
            pending = 0;
        }
    }
    reporter.report(Progress::TaskFinish);

    let solution = simulation.run()?;
    let statistics = simulation.statistics();
    reporter.report(Progress::PhaseFinish);

    if let Some(rate) = statistics.acceptance_rate() {
        reporter.report(Progress::Message(format!(
            "Acceptance rate: {:.2}%",
            rate * 100.0
        )));
    }
    info!(
        final_energy = solution.energy,
        accepted = statistics.accepted,
        rejected = statistics.rejected,
        null_moves = statistics.null_moves,
        frames = frames.len(),
        "Simulation complete."
    );

    Ok(SimulationResult {
        seed,
        initial_energy,
        solution,
        statistics,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::DiffusionEnergy;
    use crate::engine::config::SimulationConfigBuilder;
    use std::sync::Mutex;

    fn config(iterations: usize, seed: Option<u64>) -> SimulationConfig {
        SimulationConfigBuilder::new()
            .temperature(0.1)
            .iteration_limit(iterations)
            .seed(seed)
            .build()
            .unwrap()
    }

    fn initial() -> DensityState {
        DensityState::new(vec![0, 0, 3, 5, 8, 4, 2, 1]).unwrap()
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let reporter = ProgressReporter::new();
        let options = SimulateOptions::default();
        let a = run(initial(), DiffusionEnergy::new(), &config(500, Some(77)), &options, &reporter)
            .unwrap();
        let b = run(initial(), DiffusionEnergy::new(), &config(500, Some(77)), &options, &reporter)
            .unwrap();

        assert_eq!(a.seed, 77);
        assert_eq!(a, b);
        assert!(a.frames.is_empty());
    }

    #[test]
    fn unseeded_runs_report_the_seed_they_used() {
        let reporter = ProgressReporter::new();
        let first = run(
            initial(),
            DiffusionEnergy::new(),
            &config(200, None),
            &SimulateOptions::default(),
            &reporter,
        )
        .unwrap();

        let replay = run(
            initial(),
            DiffusionEnergy::new(),
            &config(200, Some(first.seed)),
            &SimulateOptions::default(),
            &reporter,
        )
        .unwrap();
        assert_eq!(first.solution, replay.solution);
    }

    #[test]
    fn frames_are_recorded_at_the_requested_interval() {
        let options = SimulateOptions {
            frame_interval: Some(25),
        };
        let result = run(
            initial(),
            DiffusionEnergy::new(),
            &config(100, Some(1)),
            &options,
            &ProgressReporter::new(),
        )
        .unwrap();

        let steps: Vec<usize> = result.frames.iter().map(|f| f.step).collect();
        assert_eq!(steps, vec![0, 25, 50, 75, 100]);
        assert_eq!(result.frames[0].energy, result.initial_energy);
        let last = result.frames.last().unwrap();
        assert_eq!(last.energy, result.solution.energy);
        assert_eq!(last.density, result.solution.density.to_vec());
        assert!(result.frames.iter().all(|f| f.density.iter().sum::<u64>() == 23));
    }

    #[test]
    fn zero_frame_interval_records_nothing() {
        let options = SimulateOptions {
            frame_interval: Some(0),
        };
        let result = run(
            initial(),
            DiffusionEnergy::new(),
            &config(10, Some(1)),
            &options,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(result.frames.is_empty());
    }

    #[test]
    fn progress_increments_cover_every_step() {
        let total = Mutex::new(0u64);
        let finished = Mutex::new(false);
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| match event {
            Progress::TaskIncrement { amount } => *total.lock().unwrap() += amount,
            Progress::TaskFinish => *finished.lock().unwrap() = true,
            _ => {}
        }));

        run(
            initial(),
            DiffusionEnergy::new(),
            &config(1_234, Some(5)),
            &SimulateOptions::default(),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        assert_eq!(total.into_inner().unwrap(), 1_234);
        assert!(finished.into_inner().unwrap());
    }

    #[test]
    fn statistics_account_for_every_step() {
        let result = run(
            initial(),
            DiffusionEnergy::new(),
            &config(300, Some(8)),
            &SimulateOptions::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(result.statistics.steps(), 300);
        assert!(result.solution.energy <= result.initial_energy + 1.0);
    }

    #[test]
    fn invalid_temperature_fails_before_any_progress_task() {
        let started = Mutex::new(false);
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::TaskStart { .. } = event {
                *started.lock().unwrap() = true;
            }
        }));
        let bad = SimulationConfigBuilder::new()
            .temperature(0.0)
            .iteration_limit(10)
            .build()
            .unwrap();

        let err = run(
            initial(),
            DiffusionEnergy::new(),
            &bad,
            &SimulateOptions::default(),
            &reporter,
        )
        .unwrap_err();
        drop(reporter);

        assert_eq!(err, EngineError::ZeroTemperature);
        assert!(!started.into_inner().unwrap());
    }
}
