//! Potential function method solvers
//!
//! [`PotentialClassifier`] implements the incremental update rule and reports
//! every observation to a [`TrainingPolicy`]. [`AdaptiveClassifier`] pairs it
//! with the [`AdaptivePolicy`] and trains cyclically until the
//! [`ConvergenceSchedule`] certifies the result.

pub mod adaptive;
pub mod policy;
pub mod potential;
pub mod schedule;

pub use self::adaptive::*;
pub use self::policy::*;
pub use self::potential::*;
pub use self::schedule::*;

use crate::core::{LabeledPoint, PFMError, Result};
use std::fmt::Debug;

/// Check that all points share one dimensionality and carry a known label
///
/// `expected_dim` is the dimensionality already fixed by earlier training, if any.
pub(crate) fn validate_points<L: PartialEq + Debug>(
    points: &[LabeledPoint<L>],
    first: &L,
    second: &L,
    expected_dim: Option<usize>,
) -> Result<()> {
    let Some(expected) = expected_dim.or_else(|| points.first().map(|p| p.features.dim())) else {
        return Ok(());
    };

    for point in points {
        if point.features.dim() != expected {
            return Err(PFMError::DimensionMismatch {
                expected,
                actual: point.features.dim(),
            });
        }
        if point.label != *first && point.label != *second {
            return Err(PFMError::UnknownLabel(format!("{:?}", point.label)));
        }
    }

    Ok(())
}
