//! Reciprocal-distance kernel implementation
//!
//! The reciprocal-distance kernel is defined as: K(x, y) = 1 / (1 + λ * ||x - y||)
//! where λ (lambda) scales how quickly similarity decays with distance.

use crate::core::FeatureVector;
use crate::kernel::Kernel;

/// Reciprocal-distance kernel: K(x, y) = 1 / (1 + λ * ||x - y||)
///
/// Decays hyperbolically with Euclidean distance, so far away support points
/// keep a noticeable influence compared to the Gaussian kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalKernel {
    lambda: f64,
}

impl ReciprocalKernel {
    /// Create a new reciprocal-distance kernel
    ///
    /// # Panics
    /// Panics if lambda is not positive
    pub fn new(lambda: f64) -> Self {
        assert!(lambda > 0.0, "Lambda must be positive, got: {}", lambda);
        Self { lambda }
    }

    /// Get the lambda parameter
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Default for ReciprocalKernel {
    /// Default reciprocal kernel with lambda = 0.5
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Kernel for ReciprocalKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        1.0 / (1.0 + self.lambda * x.distance(y))
    }

    fn name(&self) -> &'static str {
        "reciprocal"
    }
}
