//! Gaussian kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-λ * ||x - y||²)
//! where λ (lambda) is applied to the squared distance, without the square root.

use crate::core::FeatureVector;
use crate::kernel::Kernel;

/// Gaussian kernel: K(x, y) = exp(-λ * ||x - y||²)
///
/// The lambda parameter controls the "reach" of each support point:
/// - High lambda: only close points have influence
/// - Low lambda: distant points keep influence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    lambda: f64,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with specified lambda parameter
    ///
    /// # Arguments
    /// * `lambda` - The lambda parameter (must be positive)
    ///
    /// # Panics
    /// Panics if lambda is not positive
    pub fn new(lambda: f64) -> Self {
        assert!(lambda > 0.0, "Lambda must be positive, got: {}", lambda);
        Self { lambda }
    }

    /// Create Gaussian kernel with lambda = 1.0 / n_features
    ///
    /// # Arguments
    /// * `n_features` - Number of features in the dataset
    pub fn with_auto_lambda(n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(1.0 / n_features as f64)
    }

    /// Get the lambda parameter
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Default for GaussianKernel {
    /// Default Gaussian kernel with lambda = 1.0
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Kernel for GaussianKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        let squared_distance = x.squared_distance(y);
        (-self.lambda * squared_distance).exp()
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}
