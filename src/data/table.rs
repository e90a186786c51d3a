//! Comma-separated data file loading
//!
//! Each line holds one value per schema column followed by the class label:
//!
//! ```text
//! 0.00632, 18.0, 0, 17, 6.575, above
//! 0.02731,  0.0, 0, 18, 6.421, below
//! ```
//!
//! Only `continuous` columns become features. A `?` marks a missing value and
//! reads as 0.0.

use crate::core::{Dataset, FeatureVector, LabeledPoint, PFMError, Result};
use crate::data::schema::{clean, Schema};
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset loaded from a data file described by a [`Schema`]
#[derive(Debug, Clone)]
pub struct TableDataset {
    points: Vec<LabeledPoint<String>>,
    first: String,
    second: String,
    dimensions: usize,
}

impl TableDataset {
    /// Load a data file
    pub fn from_file<P: AsRef<Path>>(path: P, schema: &Schema) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(PFMError::IoError)?;
        let dataset = Self::from_reader(BufReader::new(file), schema)?;
        info!(
            "Loaded {} points with {} features from {:?}",
            dataset.points.len(),
            dataset.dimensions,
            path
        );
        Ok(dataset)
    }

    /// Load data from a reader
    pub fn from_reader<R: BufRead>(reader: R, schema: &Schema) -> Result<Self> {
        let mask = schema.feature_mask();
        let mut points = Vec::new();
        let mut missing = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(PFMError::IoError)?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            let point = Self::parse_line(line, &mask, &mut missing).map_err(|e| {
                PFMError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;
            points.push(point);
        }

        if missing > 0 {
            warn!("{missing} missing values read as 0.0");
        }

        let (first, second) = schema.classes();
        Ok(Self {
            points,
            first: first.to_string(),
            second: second.to_string(),
            dimensions: schema.dim(),
        })
    }

    fn parse_line(line: &str, mask: &[bool], missing: &mut usize) -> Result<LabeledPoint<String>> {
        let mut fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        let label = fields
            .pop()
            .map(clean)
            .ok_or_else(|| PFMError::ParseError("Missing label".to_string()))?;

        if fields.len() != mask.len() {
            return Err(PFMError::ParseError(format!(
                "expected {} values before the label, got {}",
                mask.len(),
                fields.len()
            )));
        }

        let mut values = Vec::new();
        for (column, (field, _)) in fields
            .iter()
            .zip(mask)
            .enumerate()
            .filter(|(_, (_, used))| **used)
        {
            let value = if *field == "?" {
                *missing += 1;
                0.0
            } else {
                field.parse::<f64>().map_err(|_| {
                    PFMError::ParseError(format!(
                        "Invalid feature value at column {}: {}",
                        column + 1,
                        field
                    ))
                })?
            };
            values.push(value);
        }

        Ok(LabeledPoint::new(FeatureVector::new(values), label))
    }

    /// Consume the dataset, returning its points
    pub fn into_points(self) -> Vec<LabeledPoint<String>> {
        self.points
    }
}

impl Dataset for TableDataset {
    type Label = String;

    fn len(&self) -> usize {
        self.points.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn points(&self) -> &[LabeledPoint<String>] {
        &self.points
    }

    fn classes(&self) -> (&String, &String) {
        (&self.first, &self.second)
    }
}
