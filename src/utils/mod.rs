//! Utility functions for preparing feature vectors

use crate::core::{FeatureVector, LabeledPoint};

/// Feature scaling utilities
pub mod scaling {
    use super::*;
    use crate::core::{PFMError, Result};

    /// Min-max normalization to [0, 1], fitted on a training set
    ///
    /// Distances between vectors are only meaningful if train and test data
    /// are scaled with the same parameters, so the scaler is fitted once and
    /// applied to both.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MinMaxScaler {
        mins: Vec<f64>,
        maxs: Vec<f64>,
    }

    impl MinMaxScaler {
        /// Compute per-feature minimum and maximum
        pub fn fit<L>(points: &[LabeledPoint<L>]) -> Result<Self> {
            let first = points.first().ok_or(PFMError::EmptyDataset)?;
            let dim = first.features.dim();
            let mut mins = vec![f64::INFINITY; dim];
            let mut maxs = vec![f64::NEG_INFINITY; dim];

            for point in points {
                if point.features.dim() != dim {
                    return Err(PFMError::DimensionMismatch {
                        expected: dim,
                        actual: point.features.dim(),
                    });
                }
                for (i, &value) in point.features.values().iter().enumerate() {
                    mins[i] = mins[i].min(value);
                    maxs[i] = maxs[i].max(value);
                }
            }

            Ok(Self { mins, maxs })
        }

        pub fn dim(&self) -> usize {
            self.mins.len()
        }

        /// Scale one vector; constant features map to 0.0
        ///
        /// Values outside the fitted range fall outside [0, 1].
        ///
        /// # Panics
        /// Panics if the vector length differs from the fitted dimensionality
        pub fn transform(&self, x: &FeatureVector) -> FeatureVector {
            assert_eq!(x.dim(), self.dim(), "Feature vectors must have same length");

            let values = x
                .values()
                .iter()
                .zip(self.mins.iter().zip(self.maxs.iter()))
                .map(|(&value, (&min, &max))| {
                    let range = max - min;
                    if range.abs() < 1e-12 {
                        0.0
                    } else {
                        (value - min) / range
                    }
                })
                .collect();

            FeatureVector::new(values)
        }

        /// Scale the features of labeled points, keeping their labels
        pub fn transform_points<L: Clone>(&self, points: &[LabeledPoint<L>]) -> Vec<LabeledPoint<L>> {
            points
                .iter()
                .map(|p| LabeledPoint::new(self.transform(&p.features), p.label.clone()))
                .collect()
        }
    }

    /// Convenience function: fit and transform in one step
    pub fn fit_transform<L: Clone>(
        points: &[LabeledPoint<L>],
    ) -> Result<(Vec<LabeledPoint<L>>, MinMaxScaler)> {
        let scaler = MinMaxScaler::fit(points)?;
        let transformed = scaler.transform_points(points);
        Ok((transformed, scaler))
    }
}
