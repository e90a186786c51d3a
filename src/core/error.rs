//! Error types for the potential function method

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PFMError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Training did not converge after {observations} observations ({updates} updates)")]
    NotConverged { observations: usize, updates: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PFMError>;
