//! Kernel trait definition

use crate::core::FeatureVector;

/// Kernel (potential) function trait
///
/// A kernel K(x, y) scores the similarity of two feature vectors of equal length.
/// Implementations used by the potential function method are symmetric, take
/// values in (0, 1], and reach 1 exactly when x == y.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    ///
    /// # Panics
    /// Implementations panic if `x` and `y` have different lengths
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64;

    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;
}
