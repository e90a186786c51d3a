//! High-level API for potential function classification
//!
//! This module provides a user-friendly interface for common tasks,
//! including training, prediction, and evaluation against held-out data.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rpfm::api::PFM;
//! use rpfm::data::{Schema, TableDataset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::from_file("housing.names")?;
//! let train = TableDataset::from_file("housing.data", &schema)?;
//! let test = TableDataset::from_file("housing.test", &schema)?;
//!
//! let model = PFM::new()
//!     .adaptive()
//!     .with_normalization(true)
//!     .train(&train)?;
//!
//! let metrics = model.evaluate(&test);
//! println!("Non-matches: {:.2}%", metrics.nonmatch_rate() * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{
    Dataset, FeatureVector, LabeledPoint, ModelConfig, PFMError, PotentialModel, Prediction,
    Result, ScheduleConfig, Sign, TrainingConfig, TrainingMode, TrainingSummary,
};
use crate::kernel::{AnyKernel, Kernel, ReciprocalKernel};
use crate::solver::{AdaptiveClassifier, ConvergenceSchedule, PotentialClassifier};
use crate::utils::scaling::{fit_transform, MinMaxScaler};
use log::info;
use std::borrow::Cow;
use std::fmt::Debug;

/// High-level potential function method interface with builder pattern
pub struct PFM<K: Kernel = ReciprocalKernel> {
    kernel: K,
    config: TrainingConfig,
    normalize: bool,
}

impl PFM<ReciprocalKernel> {
    /// Create a single-pass classifier with the reciprocal kernel (lambda = 0.5)
    pub fn new() -> Self {
        Self::with_kernel(ReciprocalKernel::default())
    }
}

impl Default for PFM<ReciprocalKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl PFM<AnyKernel> {
    /// Create a builder from a loaded configuration
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            kernel: config.kernel.build()?,
            config: config.training,
            normalize: config.normalize,
        })
    }
}

impl<K: Kernel> PFM<K> {
    /// Create a builder with a custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: TrainingConfig::default(),
            normalize: false,
        }
    }

    pub fn with_mode(mut self, mode: TrainingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Train cyclically until the convergence schedule is satisfied
    pub fn adaptive(self) -> Self {
        self.with_mode(TrainingMode::Adaptive)
    }

    /// Train with exactly one pass over the data
    pub fn single_pass(self) -> Self {
        self.with_mode(TrainingMode::SinglePass)
    }

    /// Cap the number of passes in adaptive mode
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.config.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.config.schedule = schedule;
        self
    }

    /// Min-max normalize features with training set statistics
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on a dataset, using its class labels
    pub fn train<D: Dataset>(self, dataset: &D) -> Result<TrainedModel<K, D::Label>> {
        let (first, second) = dataset.classes();
        self.train_points(first.clone(), second.clone(), dataset.points())
    }

    /// Train on labeled points
    pub fn train_points<L>(
        self,
        first: L,
        second: L,
        points: &[LabeledPoint<L>],
    ) -> Result<TrainedModel<K, L>>
    where
        L: Clone + PartialEq + Debug,
    {
        if points.is_empty() {
            return Err(PFMError::EmptyDataset);
        }
        if first == second {
            return Err(PFMError::InvalidDataset(format!(
                "Class labels must be distinct, got {first:?} twice"
            )));
        }
        if self.config.max_cycles == Some(0) {
            return Err(PFMError::InvalidParameter(
                "Cycle cap must be positive".to_string(),
            ));
        }

        let (points, scaler) = if self.normalize {
            let (scaled, scaler) = fit_transform(points)?;
            (Cow::Owned(scaled), Some(scaler))
        } else {
            (Cow::Borrowed(points), None)
        };

        let kernel_name = self.kernel.name();
        let (classifier, summary) = match self.config.mode {
            TrainingMode::SinglePass => {
                let mut classifier = PotentialClassifier::new(self.kernel, first, second);
                let summary = classifier.train_all(&points)?;
                (TrainedClassifier::SinglePass(classifier), summary)
            }
            TrainingMode::Adaptive => {
                let schedule = ConvergenceSchedule::new(self.config.schedule)?;
                let mut classifier =
                    AdaptiveClassifier::with_schedule(self.kernel, first, second, schedule);
                if let Some(max_cycles) = self.config.max_cycles {
                    classifier = classifier.with_max_cycles(max_cycles);
                }
                let summary = classifier.train_all(&points)?;
                (TrainedClassifier::Adaptive(classifier), summary)
            }
        };

        info!(
            "Trained {:?} classifier ({} kernel): {} observations, {} support points",
            self.config.mode, kernel_name, summary.observations, summary.updates
        );

        Ok(TrainedModel {
            classifier,
            scaler,
            summary,
        })
    }
}

enum TrainedClassifier<K: Kernel, L> {
    SinglePass(PotentialClassifier<K, L>),
    Adaptive(AdaptiveClassifier<K, L>),
}

/// Trained classifier with high-level prediction interface
pub struct TrainedModel<K: Kernel, L> {
    classifier: TrainedClassifier<K, L>,
    scaler: Option<MinMaxScaler>,
    summary: TrainingSummary,
}

impl<K, L> TrainedModel<K, L>
where
    K: Kernel,
    L: Clone + PartialEq + Debug,
{
    fn prepare<'a>(&self, x: &'a FeatureVector) -> Cow<'a, FeatureVector> {
        match &self.scaler {
            Some(scaler) => Cow::Owned(scaler.transform(x)),
            None => Cow::Borrowed(x),
        }
    }

    /// Predict a single point given in unscaled feature space
    pub fn predict(&self, x: &FeatureVector) -> Prediction<L> {
        let x = self.prepare(x);
        match &self.classifier {
            TrainedClassifier::SinglePass(classifier) => classifier.predict(&x),
            TrainedClassifier::Adaptive(classifier) => classifier.predict(&x),
        }
    }

    /// Classify a single point given in unscaled feature space
    pub fn classify(&self, x: &FeatureVector) -> L {
        self.predict(x).label
    }

    pub fn predict_batch(&self, points: &[FeatureVector]) -> Vec<Prediction<L>> {
        points.iter().map(|x| self.predict(x)).collect()
    }

    pub fn predict_dataset<D: Dataset<Label = L>>(&self, dataset: &D) -> Vec<Prediction<L>> {
        dataset
            .points()
            .iter()
            .map(|p| self.predict(&p.features))
            .collect()
    }

    /// Compare predictions with the labels of a dataset
    pub fn evaluate<D: Dataset<Label = L>>(&self, dataset: &D) -> EvaluationMetrics {
        let (first, second) = self.classes();
        let mut metrics = EvaluationMetrics::default();

        for point in dataset.points() {
            let predicted_first = self.classify(&point.features) == *first;
            if point.label == *first {
                if predicted_first {
                    metrics.true_positives += 1;
                } else {
                    metrics.false_negatives += 1;
                }
            } else if point.label == *second {
                if predicted_first {
                    metrics.false_positives += 1;
                } else {
                    metrics.true_negatives += 1;
                }
            } else {
                metrics.unknown_labels += 1;
            }
        }

        metrics
    }

    /// The two class labels, `(first, second)`
    pub fn classes(&self) -> (&L, &L) {
        match &self.classifier {
            TrainedClassifier::SinglePass(c) => (c.first(), c.second()),
            TrainedClassifier::Adaptive(c) => (c.inner().first(), c.inner().second()),
        }
    }

    /// Statistics of the training run
    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        let (kernel, support) = match &self.classifier {
            TrainedClassifier::SinglePass(c) => (c.kernel().name(), c.support_points()),
            TrainedClassifier::Adaptive(c) => (c.inner().kernel().name(), c.support_points()),
        };
        let positive = support.iter().filter(|sp| sp.sign == Sign::Positive).count();

        ModelInfo {
            kernel,
            n_support_points: support.len(),
            n_positive: positive,
            n_negative: support.len() - positive,
            normalized: self.scaler.is_some(),
            summary: self.summary,
        }
    }
}

/// Match statistics of a classifier on labeled data
///
/// `first` is treated as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Points whose label is neither class; always a mismatch
    pub unknown_labels: usize,
}

impl EvaluationMetrics {
    pub fn total(&self) -> usize {
        self.matches()
            + self.false_positives
            + self.false_negatives
            + self.unknown_labels
    }

    /// Correctly classified points
    pub fn matches(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    pub fn nonmatches(&self) -> usize {
        self.total() - self.matches()
    }

    /// Fraction of misclassified points
    pub fn nonmatch_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.nonmatches() as f64 / total as f64
        }
    }

    /// Calculate accuracy: matches / total
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.matches() as f64 / total as f64
        }
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        let denominator = self.true_positives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        let denominator = self.true_negatives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_negatives as f64 / denominator as f64
        }
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub kernel: &'static str,
    pub n_support_points: usize,
    pub n_positive: usize,
    pub n_negative: usize,
    pub normalized: bool,
    pub summary: TrainingSummary,
}

/// Convenience functions for dataset groups
///
/// A group is a path prefix naming three files: `<group>.names` (schema),
/// `<group>.data` (training set) and `<group>.test` (evaluation set).
pub mod quick {
    use super::*;
    use crate::data::{Schema, TableDataset};
    use std::path::{Path, PathBuf};

    /// File paths of a dataset group
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GroupFiles {
        pub names: PathBuf,
        pub data: PathBuf,
        pub test: PathBuf,
    }

    impl GroupFiles {
        pub fn new<P: AsRef<Path>>(group: P) -> Self {
            let with_suffix = |suffix: &str| {
                let mut path = group.as_ref().as_os_str().to_owned();
                path.push(suffix);
                PathBuf::from(path)
            };
            Self {
                names: with_suffix(".names"),
                data: with_suffix(".data"),
                test: with_suffix(".test"),
            }
        }
    }

    /// Train with the default configuration and evaluate on the test file
    pub fn evaluate_group<P: AsRef<Path>>(group: P) -> Result<EvaluationMetrics> {
        evaluate_group_with(group, &ModelConfig::default())
    }

    /// Train with the given configuration and evaluate on the test file
    pub fn evaluate_group_with<P: AsRef<Path>>(
        group: P,
        config: &ModelConfig,
    ) -> Result<EvaluationMetrics> {
        let files = GroupFiles::new(group);
        let schema = Schema::from_file(&files.names)?;
        let train = TableDataset::from_file(&files.data, &schema)?;
        let test = TableDataset::from_file(&files.test, &schema)?;

        let model = PFM::from_config(config)?.train(&train)?;
        Ok(model.evaluate(&test))
    }

    /// Sequential train/test split of a single dataset
    pub fn simple_validation<D: Dataset>(
        dataset: &D,
        train_ratio: f64,
        config: &ModelConfig,
    ) -> Result<EvaluationMetrics> {
        if train_ratio <= 0.0 || train_ratio >= 1.0 {
            return Err(PFMError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1, got: {train_ratio}"
            )));
        }

        let n = dataset.len();
        let train_size = (n as f64 * train_ratio) as usize;
        let (train, test) = dataset.points().split_at(train_size);
        let (first, second) = dataset.classes();

        let model =
            PFM::from_config(config)?.train_points(first.clone(), second.clone(), train)?;
        let test = crate::data::LabeledDataset::new(first.clone(), second.clone(), test.to_vec())?;
        Ok(model.evaluate(&test))
    }
}
