//! Schema ("names") file parsing
//!
//! Describes the columns of a data file and the two class labels:
//!
//! ```text
//! | comments start with a bar
//! yes, no.
//!
//! age:        continuous.
//! id:         ignore.
//! color:      red, green, blue.
//! ```
//!
//! A line containing `:` declares a column, any other non-empty line lists the
//! class labels (the last such line wins). Dots are removed from names, types
//! and labels.

use crate::core::{PFMError, Result};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How a column is used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Real-valued feature
    Continuous,
    /// Column skipped during loading
    Ignore,
    /// Fixed list of category values
    Categorical(Vec<String>),
}

/// A named column of the data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Parsed schema with exactly two class labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
    first: String,
    second: String,
}

impl Schema {
    /// Load a schema from a names file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(PFMError::IoError)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a schema from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut columns = Vec::new();
        let mut labels: Option<Vec<String>> = None;

        for line in reader.lines() {
            let line = line.map_err(PFMError::IoError)?;
            let line = match line.find('|') {
                Some(position) => &line[..position],
                None => line.as_str(),
            };
            let line = line.trim();

            if line.contains(':') {
                columns.push(Self::parse_column(line)?);
            } else if !line.is_empty() {
                labels = Some(line.split(',').map(clean).collect());
            }
        }

        let labels = labels.ok_or_else(|| {
            PFMError::InvalidDataset("Schema does not declare class labels".to_string())
        })?;
        let [first, second]: [String; 2] = labels.try_into().map_err(|labels: Vec<String>| {
            PFMError::InvalidDataset(format!(
                "Exactly two class labels required, got {}: {:?}",
                labels.len(),
                labels
            ))
        })?;
        if first == second || first.is_empty() {
            return Err(PFMError::InvalidDataset(format!(
                "Class labels must be distinct and non-empty, got {first:?} and {second:?}"
            )));
        }

        debug!(
            "Schema: {} columns, classes {first:?} / {second:?}",
            columns.len()
        );
        Ok(Self {
            columns,
            first,
            second,
        })
    }

    fn parse_column(line: &str) -> Result<Column> {
        let mut parts = line.split(':');
        let name = parts.next().map(clean).unwrap_or_default();
        let kind = match parts.next().map(clean) {
            Some(kind) if kind == "continuous" => ColumnKind::Continuous,
            Some(kind) if kind == "ignore" => ColumnKind::Ignore,
            Some(kind) if !kind.is_empty() => ColumnKind::Categorical(
                kind.split(',').map(|value| value.trim().to_string()).collect(),
            ),
            _ => {
                return Err(PFMError::ParseError(format!(
                    "Column {name:?} has no type"
                )))
            }
        };
        Ok(Column { name, kind })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The two class labels, `(first, second)`
    pub fn classes(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    /// Whether each column becomes a feature
    pub fn feature_mask(&self) -> Vec<bool> {
        self.columns
            .iter()
            .map(|c| c.kind == ColumnKind::Continuous)
            .collect()
    }

    /// Number of feature columns
    pub fn dim(&self) -> usize {
        self.feature_mask().into_iter().filter(|&used| used).count()
    }
}

/// Remove dots and surrounding whitespace
pub(crate) fn clean(part: &str) -> String {
    part.replace('.', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HOUSING: &str = "\
| Boston housing, price above median
above, below.

crim:  continuous.
zn:    continuous.   | proportion of zoned land
chas:  0, 1.
id:    ignore.
rm:    continuous.
";

    #[test]
    fn test_schema_basic() {
        let schema = Schema::from_reader(Cursor::new(HOUSING)).unwrap();

        assert_eq!(schema.classes(), ("above", "below"));
        assert_eq!(schema.columns().len(), 5);
        assert_eq!(schema.columns()[0].name, "crim");
        assert_eq!(schema.columns()[0].kind, ColumnKind::Continuous);
        assert_eq!(
            schema.columns()[2].kind,
            ColumnKind::Categorical(vec!["0".to_string(), "1".to_string()])
        );
        assert_eq!(schema.columns()[3].kind, ColumnKind::Ignore);
        assert_eq!(schema.feature_mask(), vec![true, true, false, false, true]);
        assert_eq!(schema.dim(), 3);
    }

    #[test]
    fn test_schema_label_dots_removed() {
        let schema = Schema::from_reader(Cursor::new(">50K, <=50K.\nage: continuous.\n")).unwrap();
        assert_eq!(schema.classes(), (">50K", "<=50K"));
    }

    #[test]
    fn test_schema_last_label_line_wins() {
        let data = "a, b\nx: continuous\nc, d\n";
        let schema = Schema::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(schema.classes(), ("c", "d"));
    }

    #[test]
    fn test_schema_missing_labels() {
        let result = Schema::from_reader(Cursor::new("x: continuous\n"));
        assert!(matches!(result, Err(PFMError::InvalidDataset(_))));
    }

    #[test]
    fn test_schema_requires_two_labels() {
        assert!(Schema::from_reader(Cursor::new("a, b, c\n")).is_err());
        assert!(Schema::from_reader(Cursor::new("a\n")).is_err());
        assert!(Schema::from_reader(Cursor::new("a, a\n")).is_err());
    }

    #[test]
    fn test_schema_column_without_type() {
        let result = Schema::from_reader(Cursor::new("a, b\nx:\n"));
        assert!(matches!(result, Err(PFMError::ParseError(_))));
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("  continuous. "), "continuous");
        assert_eq!(clean("1.5"), "15");
    }
}
