//! Training policies
//!
//! A policy receives the two signals emitted by
//! [`PotentialClassifier::observe`](crate::solver::PotentialClassifier::observe):
//! `on_update` after a misclassified point was appended as a support point,
//! and `on_match` after a correct classification.

use crate::solver::ConvergenceSchedule;
use log::debug;

/// Hooks invoked by the classifier on every observation
pub trait TrainingPolicy {
    /// A support point was appended
    fn on_update(&mut self);

    /// The observed point was already classified correctly
    fn on_match(&mut self);

    /// Whether the policy considers training finished
    fn is_converged(&self) -> bool {
        false
    }
}

/// Policy of the plain single-pass classifier: both hooks do nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassivePolicy;

impl TrainingPolicy for PassivePolicy {
    fn on_update(&mut self) {}

    fn on_match(&mut self) {}
}

/// Convergence state of the adaptive policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceState {
    /// Fewer consecutive matches than the current threshold
    Accumulating,
    /// The threshold was reached
    Converged,
}

/// Sentinel threshold before the first update
const UNBOUNDED: u64 = u64::MAX;

/// Policy tracking consecutive matches against the convergence schedule
#[derive(Debug, Clone)]
pub struct AdaptivePolicy {
    schedule: ConvergenceSchedule,
    change_count: usize,
    matches_since_last_change: u64,
    matches_needed: u64,
}

impl AdaptivePolicy {
    pub fn new(schedule: ConvergenceSchedule) -> Self {
        Self {
            schedule,
            change_count: 0,
            matches_since_last_change: 0,
            matches_needed: UNBOUNDED,
        }
    }

    pub fn schedule(&self) -> &ConvergenceSchedule {
        &self.schedule
    }

    /// Number of weight updates so far
    pub fn change_count(&self) -> usize {
        self.change_count
    }

    pub fn matches_since_last_change(&self) -> u64 {
        self.matches_since_last_change
    }

    /// Current threshold, `None` before the first update
    pub fn matches_needed(&self) -> Option<u64> {
        (self.matches_needed != UNBOUNDED).then_some(self.matches_needed)
    }

    pub fn state(&self) -> ConvergenceState {
        if self.matches_since_last_change >= self.matches_needed {
            ConvergenceState::Converged
        } else {
            ConvergenceState::Accumulating
        }
    }
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self::new(ConvergenceSchedule::default())
    }
}

impl TrainingPolicy for AdaptivePolicy {
    fn on_update(&mut self) {
        self.change_count += 1;
        self.matches_needed = self.schedule.matches_needed(self.change_count);
        self.matches_since_last_change = 0;
        debug!(
            "Update {}: {} consecutive matches needed",
            self.change_count, self.matches_needed
        );
    }

    fn on_match(&mut self) {
        self.matches_since_last_change += 1;
    }

    fn is_converged(&self) -> bool {
        self.state() == ConvergenceState::Converged
    }
}
