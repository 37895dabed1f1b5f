use super::acceptance::{AcceptanceRule, Metropolis};
use super::config::{SimulationConfig, Temperature};
use super::error::EngineError;
use super::proposer::{MoveProposer, ParticleHopProposer};
use super::state::{Phase, RunStatistics, Solution, StepOutcome};
use crate::core::density::DensityState;
use crate::core::energy::EnergyFunctional;
use rand::Rng;
use tracing::{debug, instrument, trace};

/// A Metropolis Monte Carlo run over a one-dimensional density.
///
/// The simulation is the sole owner of the live [`DensityState`]. Each [`step`](Self::step)
/// proposes one particle hop, scores it, and either commits it or leaves the state alone;
/// either way one unit of the iteration budget is spent. [`run`](Self::run) spends whatever
/// budget remains and seals the simulation in [`Phase::Finished`].
pub struct Simulation<E, R, P = ParticleHopProposer, A = Metropolis> {
    energy_model: E,
    density: DensityState,
    current_energy: f64,
    temperature: Temperature,
    iteration_limit: usize,
    remaining: usize,
    phase: Phase,
    rng: R,
    proposer: P,
    rule: A,
    statistics: RunStatistics,
}

impl<E, R> Simulation<E, R>
where
    E: EnergyFunctional,
    R: Rng,
{
    pub fn new(
        energy_model: E,
        density: DensityState,
        config: &SimulationConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        Self::with_strategies(
            energy_model,
            density,
            config,
            rng,
            ParticleHopProposer::new(),
            Metropolis::new(),
        )
    }
}

impl<E, R, P, A> Simulation<E, R, P, A>
where
    E: EnergyFunctional,
    R: Rng,
    P: MoveProposer,
    A: AcceptanceRule,
{
    pub fn with_strategies(
        energy_model: E,
        density: DensityState,
        config: &SimulationConfig,
        rng: R,
        proposer: P,
        rule: A,
    ) -> Result<Self, EngineError> {
        let temperature = Temperature::new(config.temperature)?;
        let current_energy = energy_model.energy(density.as_slice());

        debug!(
            positions = density.len(),
            particles = density.total(),
            temperature = temperature.value(),
            iterations = config.iteration_limit,
            initial_energy = current_energy,
            "Simulation configured."
        );

        Ok(Self {
            energy_model,
            density,
            current_energy,
            temperature,
            iteration_limit: config.iteration_limit,
            remaining: config.iteration_limit,
            phase: Phase::Configured,
            rng,
            proposer,
            rule,
            statistics: RunStatistics::default(),
        })
    }

    /// Performs one propose/score/decide cycle.
    ///
    /// Fails with [`EngineError::Finished`] once [`run`](Self::run) has completed, and with
    /// [`EngineError::BudgetExhausted`] when no iterations remain.
    pub fn step(&mut self) -> Result<StepOutcome, EngineError> {
        if self.phase == Phase::Finished {
            return Err(EngineError::Finished);
        }
        if self.remaining == 0 {
            return Err(EngineError::BudgetExhausted {
                iterations: self.iteration_limit,
            });
        }
        self.phase = Phase::Running;

        let candidate = self.proposer.propose(&self.density, &mut self.rng);
        let candidate_energy = self.energy_model.energy(candidate.counts());
        let accepted = self.rule.decide(
            self.current_energy,
            candidate_energy,
            self.temperature,
            &mut self.rng,
        );
        let null_move = candidate.is_null();

        if accepted && !null_move {
            self.density.replace(candidate.into_counts());
            self.current_energy = candidate_energy;
        }
        self.remaining -= 1;

        let outcome = StepOutcome {
            step: self.iteration_limit - self.remaining,
            accepted,
            null_move,
            candidate_energy,
            energy: self.current_energy,
        };
        self.statistics.record(&outcome);
        trace!(
            step = outcome.step,
            accepted,
            null_move,
            energy = self.current_energy,
            "Monte Carlo step."
        );
        Ok(outcome)
    }

    /// Spends the remaining budget and returns the final energy and density.
    #[instrument(level = "debug", skip_all, fields(remaining = self.remaining))]
    pub fn run(&mut self) -> Result<Solution, EngineError> {
        if self.phase == Phase::Finished {
            return Err(EngineError::Finished);
        }
        while self.remaining > 0 {
            self.step()?;
        }
        self.phase = Phase::Finished;

        debug!(
            energy = self.current_energy,
            accepted = self.statistics.accepted,
            rejected = self.statistics.rejected,
            null_moves = self.statistics.null_moves,
            "Simulation finished."
        );
        Ok(self.solution())
    }
}

impl<E, R, P, A> Simulation<E, R, P, A> {
    #[inline]
    pub fn energy(&self) -> f64 {
        self.current_energy
    }

    #[inline]
    pub fn density(&self) -> &DensityState {
        &self.density
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    #[inline]
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    #[inline]
    pub fn statistics(&self) -> RunStatistics {
        self.statistics
    }

    /// A copy of the current `(energy, density)` pair.
    pub fn solution(&self) -> Solution {
        Solution {
            energy: self.current_energy,
            density: self.density.clone(),
        }
    }
}
