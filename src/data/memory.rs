//! In-memory dataset

use crate::core::{Dataset, LabeledPoint, PFMError, Result};
use std::fmt::Debug;

/// Dataset built from labeled points already in memory
#[derive(Debug, Clone)]
pub struct LabeledDataset<L> {
    points: Vec<LabeledPoint<L>>,
    first: L,
    second: L,
    dimensions: usize,
}

impl<L: Clone + PartialEq + Debug> LabeledDataset<L> {
    /// Create a dataset, checking labels and dimensionality
    pub fn new(first: L, second: L, points: Vec<LabeledPoint<L>>) -> Result<Self> {
        if first == second {
            return Err(PFMError::InvalidDataset(format!(
                "Class labels must be distinct, got {first:?} twice"
            )));
        }

        let dimensions = points.first().map(|p| p.features.dim()).unwrap_or(0);
        for point in &points {
            if point.features.dim() != dimensions {
                return Err(PFMError::DimensionMismatch {
                    expected: dimensions,
                    actual: point.features.dim(),
                });
            }
            if point.label != first && point.label != second {
                return Err(PFMError::UnknownLabel(format!("{:?}", point.label)));
            }
        }

        Ok(Self {
            points,
            first,
            second,
            dimensions,
        })
    }
}

impl<L: Clone + PartialEq + Debug> Dataset for LabeledDataset<L> {
    type Label = L;

    fn len(&self) -> usize {
        self.points.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn points(&self) -> &[LabeledPoint<L>] {
        &self.points
    }

    fn classes(&self) -> (&L, &L) {
        (&self.first, &self.second)
    }
}
