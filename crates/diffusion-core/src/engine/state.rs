use crate::core::density::DensityState;
use serde::Serialize;

/// Lifecycle of a [`Simulation`](super::simulation::Simulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configured,
    Running,
    Finished,
}

/// The outcome of a completed run: final energy and the density that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub energy: f64,
    pub density: DensityState,
}

/// What happened during a single `step()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// One-based index of this step within the run.
    pub step: usize,
    pub accepted: bool,
    pub null_move: bool,
    pub candidate_energy: f64,
    /// Current energy after the step, whether or not the move was committed.
    pub energy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunStatistics {
    pub accepted: usize,
    pub rejected: usize,
    pub null_moves: usize,
}

impl RunStatistics {
    pub fn steps(&self) -> usize {
        self.accepted + self.rejected + self.null_moves
    }

    /// Fraction of real (non-null) proposals that were committed.
    pub fn acceptance_rate(&self) -> Option<f64> {
        let decided = self.accepted + self.rejected;
        if decided == 0 {
            None
        } else {
            Some(self.accepted as f64 / decided as f64)
        }
    }

    pub(crate) fn record(&mut self, outcome: &StepOutcome) {
        if outcome.null_move {
            self.null_moves += 1;
        } else if outcome.accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(accepted: bool, null_move: bool) -> StepOutcome {
        StepOutcome {
            step: 1,
            accepted,
            null_move,
            candidate_energy: 0.0,
            energy: 0.0,
        }
    }

    #[test]
    fn record_counts_each_kind_of_outcome() {
        let mut stats = RunStatistics::default();
        stats.record(&outcome(true, false));
        stats.record(&outcome(true, false));
        stats.record(&outcome(false, false));
        stats.record(&outcome(true, true));

        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.null_moves, 1);
        assert_eq!(stats.steps(), 4);
    }

    #[test]
    fn acceptance_rate_ignores_null_moves() {
        let stats = RunStatistics {
            accepted: 3,
            rejected: 1,
            null_moves: 10,
        };
        assert_eq!(stats.acceptance_rate(), Some(0.75));
    }

    #[test]
    fn acceptance_rate_is_undefined_without_decisions() {
        assert_eq!(RunStatistics::default().acceptance_rate(), None);
    }
}
