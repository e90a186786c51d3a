//! Core traits for the potential function method

use crate::core::{FeatureVector, LabeledPoint, Prediction};

/// Labeled dataset abstraction with exactly two classes
pub trait Dataset {
    /// Class label type
    type Label: Clone + PartialEq + std::fmt::Debug;

    /// Number of points in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// All labeled points in file order
    fn points(&self) -> &[LabeledPoint<Self::Label>];

    /// The two class labels, `(first, second)`
    fn classes(&self) -> (&Self::Label, &Self::Label);

    /// Get a single point by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_point(&self, i: usize) -> &LabeledPoint<Self::Label> {
        &self.points()[i]
    }

    /// Get all labels as a vector
    fn get_labels(&self) -> Vec<Self::Label> {
        self.points().iter().map(|p| p.label.clone()).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained (or training) potential function model
pub trait PotentialModel<L: Clone> {
    /// Predict a single point
    fn predict(&self, x: &FeatureVector) -> Prediction<L>;

    /// Predict multiple points
    fn predict_batch(&self, points: &[FeatureVector]) -> Vec<Prediction<L>> {
        points.iter().map(|x| self.predict(x)).collect()
    }

    /// Number of retained support points
    fn n_support_points(&self) -> usize;
}
