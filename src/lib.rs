//! Rust implementation of the potential function method
//!
//! An incremental, kernel-weighted binary classifier with an adaptive stopping
//! rule derived from a union-bound confidence argument.

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod solver;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, PFM};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::PFMError;
pub use crate::data::{LabeledDataset, Schema, TableDataset};
pub use crate::kernel::{AnyKernel, GaussianKernel, Kernel, KernelKind, ReciprocalKernel};
pub use crate::solver::{
    AdaptiveClassifier, AdaptivePolicy, ConvergenceSchedule, ConvergenceState, PassivePolicy,
    PotentialClassifier, TrainingPolicy,
};
pub use crate::utils::scaling::MinMaxScaler;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
