//! Potential function classifier
//!
//! The classifier keeps a growing list of signed support points. A point x is
//! scored by the potential Σᵢ signᵢ · K(x, pointᵢ); a positive potential means
//! `first`, anything else (including a zero tie) means `second`. Training is
//! incremental: every misclassified point is appended with the sign of its
//! true class, correctly classified points leave the state untouched.

use crate::core::{
    FeatureVector, LabeledPoint, Outcome, PotentialModel, Prediction, Result, Sign,
    SupportPoint, TrainingSummary,
};
use crate::kernel::Kernel;
use crate::solver::{validate_points, PassivePolicy, TrainingPolicy};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    First,
    Second,
}

/// Incremental kernel-weighted binary classifier
#[derive(Debug, Clone)]
pub struct PotentialClassifier<K: Kernel, L, P: TrainingPolicy = PassivePolicy> {
    kernel: K,
    first: L,
    second: L,
    support: Vec<SupportPoint>,
    policy: P,
}

impl<K, L> PotentialClassifier<K, L, PassivePolicy>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
{
    /// Create an untrained classifier with no-op training hooks
    ///
    /// # Panics
    /// Panics if `first == second`
    pub fn new(kernel: K, first: L, second: L) -> Self {
        Self::with_policy(kernel, first, second, PassivePolicy)
    }
}

impl<K, L, P> PotentialClassifier<K, L, P>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
    P: TrainingPolicy,
{
    /// Create an untrained classifier driving the given policy
    ///
    /// # Panics
    /// Panics if `first == second`
    pub fn with_policy(kernel: K, first: L, second: L, policy: P) -> Self {
        assert!(first != second, "Class labels must be distinct, got {first:?} twice");
        Self {
            kernel,
            first,
            second,
            support: Vec::new(),
            policy,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn first(&self) -> &L {
        &self.first
    }

    pub fn second(&self) -> &L {
        &self.second
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Support points in the order they were added
    pub fn support_points(&self) -> &[SupportPoint] {
        &self.support
    }

    /// Feature dimensionality fixed by the first support point
    pub fn dim(&self) -> Option<usize> {
        self.support.first().map(|sp| sp.point.dim())
    }

    /// Potential of `x`: Σᵢ signᵢ · K(x, pointᵢ)
    ///
    /// # Panics
    /// Panics if `x` has a different length than the support points
    pub fn decision_value(&self, x: &FeatureVector) -> f64 {
        self.support
            .iter()
            .map(|sp| sp.sign.value() * self.kernel.compute(x, &sp.point))
            .sum()
    }

    fn side(&self, x: &FeatureVector) -> Side {
        if self.support.is_empty() || self.decision_value(x) > 0.0 {
            Side::First
        } else {
            Side::Second
        }
    }

    fn label_of(&self, side: Side) -> &L {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Classify a point; an untrained classifier always answers `first`
    pub fn classify(&self, x: &FeatureVector) -> &L {
        self.label_of(self.side(x))
    }

    /// Observe one labeled point, appending it as a support point if misclassified
    ///
    /// A label that is neither `first` nor `second` counts as a match.
    pub fn observe(&mut self, x: &FeatureVector, label: &L) -> Outcome {
        let outcome = match self.side(x) {
            Side::First if *label == self.second => Outcome::Updated(Sign::Negative),
            Side::Second if *label == self.first => Outcome::Updated(Sign::Positive),
            _ => Outcome::Matched,
        };

        match outcome {
            Outcome::Updated(sign) => {
                self.support.push(SupportPoint::new(sign, x.clone()));
                self.policy.on_update();
            }
            Outcome::Matched => self.policy.on_match(),
        }

        outcome
    }

    /// Observe every point once, in order
    pub fn train_all(&mut self, points: &[LabeledPoint<L>]) -> Result<TrainingSummary> {
        validate_points(points, &self.first, &self.second, self.dim())?;

        let mut summary = TrainingSummary {
            passes: usize::from(!points.is_empty()),
            ..TrainingSummary::default()
        };
        for point in points {
            if self.observe(&point.features, &point.label).is_update() {
                summary.updates += 1;
            }
            summary.observations += 1;
        }

        Ok(summary)
    }
}

impl<K, L, P> PotentialModel<L> for PotentialClassifier<K, L, P>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
    P: TrainingPolicy,
{
    fn predict(&self, x: &FeatureVector) -> Prediction<L> {
        let decision_value = self.decision_value(x);
        Prediction::new(self.classify(x).clone(), decision_value)
    }

    fn n_support_points(&self) -> usize {
        self.support.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PFMError;
    use crate::kernel::{GaussianKernel, ReciprocalKernel};

    fn fv(values: &[f64]) -> FeatureVector {
        FeatureVector::from(values)
    }

    fn two_points() -> Vec<LabeledPoint<&'static str>> {
        vec![
            LabeledPoint::new(fv(&[0.0, 0.0]), "A"),
            LabeledPoint::new(fv(&[10.0, 10.0]), "B"),
        ]
    }

    #[test]
    fn test_untrained_classifier_returns_first() {
        let classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        for x in [fv(&[0.0, 0.0]), fv(&[-5.0, 3.0]), fv(&[100.0, 100.0])] {
            assert_eq!(*classifier.classify(&x), "A");
        }
        assert_eq!(classifier.dim(), None);
    }

    #[test]
    #[should_panic(expected = "Class labels must be distinct")]
    fn test_equal_labels_rejected() {
        PotentialClassifier::new(ReciprocalKernel::default(), "A", "A");
    }

    #[test]
    fn test_observe_misclassified_second() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        let outcome = classifier.observe(&fv(&[1.0, 1.0]), &"B");

        assert_eq!(outcome, Outcome::Updated(Sign::Negative));
        assert_eq!(
            classifier.support_points(),
            &[SupportPoint::new(Sign::Negative, fv(&[1.0, 1.0]))]
        );
        assert_eq!(*classifier.classify(&fv(&[1.0, 1.0])), "B");
    }

    #[test]
    fn test_observe_misclassified_first() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        classifier.observe(&fv(&[1.0]), &"B");
        let outcome = classifier.observe(&fv(&[-1.0]), &"A");

        assert_eq!(outcome, Outcome::Updated(Sign::Positive));
        assert_eq!(classifier.support_points().len(), 2);
        assert_eq!(classifier.support_points()[1].sign, Sign::Positive);
    }

    #[test]
    fn test_observe_match_does_not_mutate() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        classifier.train_all(&two_points()).unwrap();
        classifier.train_all(&two_points()).unwrap();
        let before = classifier.support_points().to_vec();

        for _ in 0..5 {
            assert_eq!(classifier.observe(&fv(&[0.0, 0.0]), &"A"), Outcome::Matched);
            assert_eq!(classifier.observe(&fv(&[10.0, 10.0]), &"B"), Outcome::Matched);
        }
        assert_eq!(classifier.support_points(), before.as_slice());
    }

    #[test]
    fn test_support_grows_by_at_most_one() {
        let mut classifier = PotentialClassifier::new(GaussianKernel::new(0.5), 1, 2);
        let data = [
            (fv(&[0.0]), 2),
            (fv(&[0.2]), 1),
            (fv(&[0.4]), 2),
            (fv(&[0.6]), 1),
            (fv(&[0.8]), 2),
            (fv(&[0.8]), 2),
        ];

        for (x, label) in &data {
            let before = classifier.support_points().to_vec();
            let outcome = classifier.observe(x, label);
            let after = classifier.support_points();

            let expected_len = before.len() + usize::from(outcome.is_update());
            assert_eq!(after.len(), expected_len);
            assert_eq!(&after[..before.len()], before.as_slice());
        }
    }

    #[test]
    fn test_unknown_label_counts_as_match() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        assert_eq!(classifier.observe(&fv(&[1.0]), &"C"), Outcome::Matched);
        assert!(classifier.support_points().is_empty());
    }

    #[test]
    fn test_tie_resolves_to_second() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::new(1.0), "A", "B");
        classifier.observe(&fv(&[1.0]), &"B");
        classifier.observe(&fv(&[-1.0]), &"A");

        // Equidistant from both support points: potential is exactly zero
        assert_eq!(classifier.decision_value(&fv(&[0.0])), 0.0);
        assert_eq!(*classifier.classify(&fv(&[0.0])), "B");
    }

    #[test]
    fn test_train_all_two_point_scenario() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::new(0.5), "A", "B");
        let summary = classifier.train_all(&two_points()).unwrap();

        assert_eq!(summary.observations, 2);
        assert_eq!(summary.updates, 1);
        assert_eq!(summary.passes, 1);
        assert!(!summary.converged);

        // One pass only retains the second point, pulling everything towards "B"
        assert_eq!(*classifier.classify(&fv(&[0.1, 0.1])), "B");

        let summary = classifier.train_all(&two_points()).unwrap();
        assert_eq!(summary.updates, 1);
        assert_eq!(classifier.support_points().len(), 2);
        assert_eq!(*classifier.classify(&fv(&[0.1, 0.1])), "A");
        assert_eq!(*classifier.classify(&fv(&[9.9, 9.9])), "B");
    }

    #[test]
    fn test_train_all_empty_is_noop() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        let summary = classifier.train_all(&[]).unwrap();
        assert_eq!(summary, TrainingSummary::default());
    }

    #[test]
    fn test_train_all_rejects_dimension_mismatch() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        let points = vec![
            LabeledPoint::new(fv(&[0.0, 0.0]), "A"),
            LabeledPoint::new(fv(&[1.0]), "B"),
        ];
        assert!(matches!(
            classifier.train_all(&points),
            Err(PFMError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(classifier.support_points().is_empty());
    }

    #[test]
    fn test_train_all_rejects_unknown_label() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::default(), "A", "B");
        let points = vec![LabeledPoint::new(fv(&[0.0]), "C")];
        assert!(matches!(
            classifier.train_all(&points),
            Err(PFMError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_predict_reports_decision_value() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::new(0.5), "A", "B");
        classifier.train_all(&two_points()).unwrap();

        let prediction = classifier.predict(&fv(&[10.0, 10.0]));
        assert_eq!(prediction.label, "B");
        assert_eq!(prediction.decision_value, -1.0);
        assert_eq!(classifier.n_support_points(), 1);
    }

    #[test]
    fn test_predict_batch_matches_classify() {
        let mut classifier = PotentialClassifier::new(ReciprocalKernel::new(0.5), "A", "B");
        classifier.train_all(&two_points()).unwrap();
        classifier.train_all(&two_points()).unwrap();

        let queries = vec![fv(&[0.1, 0.1]), fv(&[9.9, 9.9]), fv(&[5.0, 5.0])];
        let predictions = classifier.predict_batch(&queries);

        assert_eq!(predictions.len(), queries.len());
        for (query, prediction) in queries.iter().zip(&predictions) {
            assert_eq!(prediction.label, *classifier.classify(query));
            assert_eq!(prediction.decision_value, classifier.decision_value(query));
        }
        assert_eq!(predictions[0].label, "A");
        assert_eq!(predictions[1].label, "B");
        // Equidistant from both support points
        assert_eq!(predictions[2].decision_value, 0.0);
        assert_eq!(predictions[2].label, "B");
    }
}
