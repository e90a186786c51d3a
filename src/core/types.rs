//! Core type definitions for the potential function method

use crate::core::Result;
use crate::kernel::KernelKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Dense feature vector with a fixed length per dataset
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create a new feature vector
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Feature values in column order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of features
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Check if the vector has no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all features, accumulated left to right
    pub fn sum(&self) -> f64 {
        self.values.iter().fold(0.0, |acc, &v| acc + v)
    }

    /// Arithmetic mean of all features (NaN for an empty vector)
    pub fn average(&self) -> f64 {
        self.sum() / self.values.len() as f64
    }

    /// Squared Euclidean distance: Σᵢ (xᵢ - yᵢ)²
    ///
    /// # Panics
    /// Panics if the vectors have different lengths
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        assert_eq!(
            self.values.len(),
            other.values.len(),
            "Feature vectors must have same length"
        );

        self.values
            .iter()
            .zip(other.values.iter())
            .fold(0.0, |acc, (&x, &y)| {
                let diff = x - y;
                acc + diff * diff
            })
    }

    /// Euclidean distance
    ///
    /// # Panics
    /// Panics if the vectors have different lengths
    pub fn distance(&self, other: &FeatureVector) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for FeatureVector {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

/// Weight sign of a support point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Retained because a `first` point was classified as `second`
    Positive,
    /// Retained because a `second` point was classified as `first`
    Negative,
}

impl Sign {
    /// Numeric weight (+1 or -1)
    pub fn value(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Training vector retained with a signed weight
#[derive(Clone, Debug, PartialEq)]
pub struct SupportPoint {
    pub sign: Sign,
    pub point: FeatureVector,
}

impl SupportPoint {
    pub fn new(sign: Sign, point: FeatureVector) -> Self {
        Self { sign, point }
    }
}

/// Feature vector paired with its class label
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledPoint<L> {
    pub features: FeatureVector,
    pub label: L,
}

impl<L> LabeledPoint<L> {
    pub fn new(features: FeatureVector, label: L) -> Self {
        Self { features, label }
    }
}

/// Prediction result containing label and decision value
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<L> {
    /// Predicted class label
    pub label: L,
    /// Raw kernel-weighted sum over the support points
    pub decision_value: f64,
}

impl<L> Prediction<L> {
    pub fn new(label: L, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Result of observing a single labeled point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The point was misclassified and appended as a support point
    Updated(Sign),
    /// The point was classified correctly; nothing changed
    Matched,
}

impl Outcome {
    pub fn is_update(&self) -> bool {
        matches!(self, Outcome::Updated(_))
    }
}

/// Statistics of a `train_all` run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrainingSummary {
    /// Number of `observe` calls
    pub observations: usize,
    /// Number of observations that appended a support point
    pub updates: usize,
    /// Number of passes over the training sequence that were started
    pub passes: usize,
    /// Whether the convergence rule certified the result
    pub converged: bool,
}

/// Parameters of the convergence threshold schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Per-trial detection margin (eps)
    pub epsilon: f64,
    /// Confidence parameter (nu) scaling the per-update failure share;
    /// a smaller value demands more consecutive matches
    pub confidence: f64,
    /// Number of terms of the normalizing series
    pub series_terms: usize,
    /// Exponent of the per-update failure share 1 / change^n
    pub exponent: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            confidence: 0.9,
            series_terms: 1000,
            exponent: 3,
        }
    }
}

/// How `train_all` traverses the training set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    /// One pass over the data, one observation per point
    #[default]
    SinglePass,
    /// Cycle over the data until the convergence schedule is satisfied
    Adaptive,
}

/// Configuration for training
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub mode: TrainingMode,
    /// Upper bound on full passes in adaptive mode (unbounded when `None`)
    pub max_cycles: Option<usize>,
    pub schedule: ScheduleConfig,
}

/// Full model configuration, loadable from a JSON file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub kernel: KernelKind,
    pub training: TrainingConfig,
    /// Min-max normalize features using training set statistics
    pub normalize: bool,
}

impl ModelConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
