//! Data loading and dataset implementations
//!
//! Datasets come as a schema ("names") file describing the columns and the two
//! class labels, plus comma-separated data files with the label in the last
//! field. In-memory points can be wrapped in a [`LabeledDataset`].

pub mod memory;
pub mod schema;
pub mod table;

pub use self::memory::*;
pub use self::schema::{Column, ColumnKind, Schema};
pub use self::table::*;
