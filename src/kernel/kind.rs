//! Runtime kernel selection
//!
//! `KernelKind` is the serializable description used by configuration files
//! and the CLI; `AnyKernel` is the validated kernel built from it.

use crate::core::{FeatureVector, PFMError, Result};
use crate::kernel::{GaussianKernel, Kernel, ReciprocalKernel};
use serde::{Deserialize, Serialize};

/// Kernel choice with its scale parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelKind {
    /// 1 / (1 + λ * ||x - y||)
    Reciprocal { lambda: f64 },
    /// exp(-λ * ||x - y||²)
    Gaussian { lambda: f64 },
}

impl Default for KernelKind {
    fn default() -> Self {
        KernelKind::Reciprocal { lambda: 0.5 }
    }
}

impl KernelKind {
    pub fn lambda(&self) -> f64 {
        match *self {
            KernelKind::Reciprocal { lambda } | KernelKind::Gaussian { lambda } => lambda,
        }
    }

    /// Validate the parameters and build the kernel
    pub fn build(&self) -> Result<AnyKernel> {
        let lambda = self.lambda();
        if lambda <= 0.0 || !lambda.is_finite() {
            return Err(PFMError::InvalidParameter(format!(
                "Lambda must be a positive finite number, got: {lambda}"
            )));
        }

        Ok(match *self {
            KernelKind::Reciprocal { lambda } => {
                AnyKernel::Reciprocal(ReciprocalKernel::new(lambda))
            }
            KernelKind::Gaussian { lambda } => AnyKernel::Gaussian(GaussianKernel::new(lambda)),
        })
    }
}

/// One of the supported kernels, chosen at runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyKernel {
    Reciprocal(ReciprocalKernel),
    Gaussian(GaussianKernel),
}

impl Kernel for AnyKernel {
    fn compute(&self, x: &FeatureVector, y: &FeatureVector) -> f64 {
        match self {
            AnyKernel::Reciprocal(kernel) => kernel.compute(x, y),
            AnyKernel::Gaussian(kernel) => kernel.compute(x, y),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyKernel::Reciprocal(kernel) => kernel.name(),
            AnyKernel::Gaussian(kernel) => kernel.name(),
        }
    }
}

impl From<ReciprocalKernel> for AnyKernel {
    fn from(kernel: ReciprocalKernel) -> Self {
        AnyKernel::Reciprocal(kernel)
    }
}

impl From<GaussianKernel> for AnyKernel {
    fn from(kernel: GaussianKernel) -> Self {
        AnyKernel::Gaussian(kernel)
    }
}
