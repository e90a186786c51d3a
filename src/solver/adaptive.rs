//! Adaptive potential function classifier
//!
//! Cycles over the training set, wrapping around after the last point, until
//! the number of consecutive correct classifications since the last update
//! reaches the threshold of the [`ConvergenceSchedule`]. The threshold starts
//! out unbounded, so at least one update must happen before training can stop.

use crate::core::{
    FeatureVector, LabeledPoint, Outcome, PFMError, PotentialModel, Prediction, Result,
    SupportPoint, TrainingSummary,
};
use crate::kernel::Kernel;
use crate::solver::{
    validate_points, AdaptivePolicy, ConvergenceSchedule, ConvergenceState, PotentialClassifier,
    TrainingPolicy,
};
use log::{info, warn};
use std::fmt::Debug;

/// Potential function classifier with a data-driven stopping rule
#[derive(Debug, Clone)]
pub struct AdaptiveClassifier<K: Kernel, L> {
    inner: PotentialClassifier<K, L, AdaptivePolicy>,
    max_cycles: Option<usize>,
}

impl<K, L> AdaptiveClassifier<K, L>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
{
    /// Create an untrained classifier with the default schedule
    ///
    /// # Panics
    /// Panics if `first == second`
    pub fn new(kernel: K, first: L, second: L) -> Self {
        Self::with_schedule(kernel, first, second, ConvergenceSchedule::default())
    }

    /// Create an untrained classifier with a custom schedule
    pub fn with_schedule(kernel: K, first: L, second: L, schedule: ConvergenceSchedule) -> Self {
        Self {
            inner: PotentialClassifier::with_policy(
                kernel,
                first,
                second,
                AdaptivePolicy::new(schedule),
            ),
            max_cycles: None,
        }
    }

    /// Stop with [`PFMError::NotConverged`] after `max_cycles` full passes
    ///
    /// # Panics
    /// Panics if `max_cycles` is zero
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        assert!(max_cycles > 0, "Cycle cap must be positive");
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn max_cycles(&self) -> Option<usize> {
        self.max_cycles
    }

    pub fn classify(&self, x: &FeatureVector) -> &L {
        self.inner.classify(x)
    }

    pub fn decision_value(&self, x: &FeatureVector) -> f64 {
        self.inner.decision_value(x)
    }

    pub fn observe(&mut self, x: &FeatureVector, label: &L) -> Outcome {
        self.inner.observe(x, label)
    }

    pub fn support_points(&self) -> &[SupportPoint] {
        self.inner.support_points()
    }

    pub fn policy(&self) -> &AdaptivePolicy {
        self.inner.policy()
    }

    pub fn state(&self) -> ConvergenceState {
        self.inner.policy().state()
    }

    /// The underlying classifier
    pub fn inner(&self) -> &PotentialClassifier<K, L, AdaptivePolicy> {
        &self.inner
    }

    /// Cycle over `points` until the convergence threshold is reached
    ///
    /// Without a cycle cap this does not return if the threshold is never
    /// reached.
    pub fn train_all(&mut self, points: &[LabeledPoint<L>]) -> Result<TrainingSummary> {
        if points.is_empty() {
            return Err(PFMError::EmptyDataset);
        }
        validate_points(
            points,
            self.inner.first(),
            self.inner.second(),
            self.inner.dim(),
        )?;

        let mut summary = TrainingSummary::default();
        let mut index = 0;
        loop {
            if index == 0 {
                if self.max_cycles.is_some_and(|max| summary.passes >= max) {
                    warn!(
                        "Stopped after {} passes without convergence ({} updates)",
                        summary.passes, summary.updates
                    );
                    return Err(PFMError::NotConverged {
                        observations: summary.observations,
                        updates: summary.updates,
                    });
                }
                summary.passes += 1;
            }

            let point = &points[index];
            if self.inner.observe(&point.features, &point.label).is_update() {
                summary.updates += 1;
            }
            summary.observations += 1;

            if self.inner.policy().is_converged() {
                summary.converged = true;
                info!(
                    "Converged after {} observations, {} support points",
                    summary.observations,
                    self.inner.support_points().len()
                );
                return Ok(summary);
            }

            index = (index + 1) % points.len();
        }
    }
}

impl<K, L> PotentialModel<L> for AdaptiveClassifier<K, L>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
{
    fn predict(&self, x: &FeatureVector) -> Prediction<L> {
        self.inner.predict(x)
    }

    fn n_support_points(&self) -> usize {
        self.inner.n_support_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{GaussianKernel, ReciprocalKernel};

    fn fv(values: &[f64]) -> FeatureVector {
        FeatureVector::from(values)
    }

    #[test]
    fn test_two_point_scenario_converges() {
        let mut classifier = AdaptiveClassifier::new(ReciprocalKernel::new(0.5), "A", "B");
        let points = vec![
            LabeledPoint::new(fv(&[0.0, 0.0]), "A"),
            LabeledPoint::new(fv(&[10.0, 10.0]), "B"),
        ];

        let summary = classifier.train_all(&points).unwrap();

        // One match, two updates, then matches_needed(2) = 46 consecutive matches
        assert!(summary.converged);
        assert_eq!(summary.updates, 2);
        assert_eq!(summary.observations, 49);
        assert_eq!(summary.passes, 25);
        assert_eq!(classifier.state(), ConvergenceState::Converged);
        assert_eq!(classifier.policy().change_count(), 2);

        assert_eq!(*classifier.classify(&fv(&[0.1, 0.1])), "A");
        assert_eq!(*classifier.classify(&fv(&[9.9, 9.9])), "B");
    }

    #[test]
    fn test_converged_classifier_fits_small_training_set() {
        let mut classifier = AdaptiveClassifier::new(GaussianKernel::new(1.0), "A", "B");
        let points = vec![
            LabeledPoint::new(fv(&[0.0]), "A"),
            LabeledPoint::new(fv(&[0.1]), "A"),
            LabeledPoint::new(fv(&[0.9]), "B"),
            LabeledPoint::new(fv(&[1.0]), "B"),
        ];

        let summary = classifier.train_all(&points).unwrap();
        assert!(summary.converged);
        assert_eq!(summary.updates, 2);

        for point in &points {
            assert_eq!(classifier.classify(&point.features), &point.label);
        }
    }

    #[test]
    fn test_empty_training_set() {
        let mut classifier = AdaptiveClassifier::new(ReciprocalKernel::default(), "A", "B");
        assert!(matches!(
            classifier.train_all(&[]),
            Err(PFMError::EmptyDataset)
        ));
    }

    #[test]
    fn test_single_class_data_never_converges() {
        let mut classifier =
            AdaptiveClassifier::new(ReciprocalKernel::default(), "A", "B").with_max_cycles(3);
        let points = vec![
            LabeledPoint::new(fv(&[0.0]), "A"),
            LabeledPoint::new(fv(&[1.0]), "A"),
        ];

        match classifier.train_all(&points) {
            Err(PFMError::NotConverged {
                observations,
                updates,
            }) => {
                assert_eq!(observations, 6);
                assert_eq!(updates, 0);
            }
            other => panic!("expected NotConverged, got {other:?}"),
        }
        assert_eq!(classifier.policy().matches_needed(), None);
    }

    #[test]
    fn test_contradictory_data_hits_cycle_cap() {
        let mut classifier =
            AdaptiveClassifier::new(ReciprocalKernel::default(), "A", "B").with_max_cycles(10);
        let points = vec![
            LabeledPoint::new(fv(&[0.0]), "A"),
            LabeledPoint::new(fv(&[0.0]), "B"),
        ];

        let result = classifier.train_all(&points);
        assert!(matches!(
            result,
            Err(PFMError::NotConverged {
                observations: 20,
                ..
            })
        ));
        assert_eq!(classifier.state(), ConvergenceState::Accumulating);
    }

    #[test]
    #[should_panic(expected = "Cycle cap must be positive")]
    fn test_zero_cycle_cap() {
        AdaptiveClassifier::new(ReciprocalKernel::default(), "A", "B").with_max_cycles(0);
    }

    #[test]
    fn test_retraining_after_convergence_stops_early() {
        let mut classifier = AdaptiveClassifier::new(ReciprocalKernel::new(0.5), 1u8, 2u8);
        let points = vec![
            LabeledPoint::new(fv(&[0.0, 0.0]), 1),
            LabeledPoint::new(fv(&[10.0, 10.0]), 2),
        ];
        classifier.train_all(&points).unwrap();

        let summary = classifier.train_all(&points).unwrap();
        assert_eq!(summary.observations, 1);
        assert_eq!(summary.updates, 0);
    }
}
