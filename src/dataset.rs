//! Dataset module: ordered records read from and written to files.
//!
//! # Core Components
//!
//! - [`Dataset`] - ordered records plus their column order
//! - [`record::Record`] - one row of named field values
//! - [`field_value::FieldValue`] - scalar cell types
//! - [`schema::DatasetSchema`] - which fields hold the narrative and the label
//! - [`converter`] - CSV and JSONL readers and writers
//!
//! # Examples
//!
//! ```
//! use verdict::dataset::Dataset;
//! use verdict::dataset::record::Record;
//! use verdict::ml::naive_bayes::Label;
//!
//! let dataset = Dataset::from_records(vec![
//!     Record::new().with_field("outcome", "Pleaded guilty").with_field("guilty", "unknown"),
//! ]);
//!
//! let labeled = dataset.with_predictions("guilty", [(0, Label::Guilty)]).unwrap();
//! assert_eq!(labeled.get(0).unwrap().get_field("guilty").unwrap().as_integer(), Some(1));
//! // the input is untouched
//! assert_eq!(dataset.get(0).unwrap().get_field("guilty").unwrap().as_text(), Some("unknown"));
//! ```

use std::path::Path;

use crate::dataset::converter::DatasetFormat;
use crate::dataset::field_value::FieldValue;
use crate::dataset::record::Record;
use crate::error::{Result, VerdictError};
use crate::ml::naive_bayes::Label;

pub mod converter;
pub mod field_value;
pub mod record;
pub mod schema;

pub use converter::DatasetConverter;
pub use schema::{DatasetSchema, Partition, RecordLabel};

/// Ordered sequence of records sharing a column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        Dataset {
            columns,
            records: Vec::new(),
        }
    }

    /// Build a dataset from records. Columns are collected in first-seen order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut dataset = Dataset::default();
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    /// Read a dataset, picking the format from the file extension.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        DatasetFormat::from_path(path.as_ref())?.read(path)
    }

    /// Write the dataset, picking the format from the file extension.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DatasetFormat::from_path(path.as_ref())?.write(self, path)
    }

    /// Append a record. Fields not yet in the column list are added to it.
    pub fn push(&mut self, record: Record) {
        let mut new_columns: Vec<&str> = record
            .field_names()
            .into_iter()
            .filter(|name| !self.columns.iter().any(|c| c == name))
            .collect();
        new_columns.sort_unstable();
        self.columns
            .extend(new_columns.into_iter().map(str::to_string));
        self.records.push(record);
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `name` is one of the dataset's columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All records in row order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at row `row`.
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Iterate records in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the rows at `rows`, in the order given.
    pub fn select(&self, rows: &[usize]) -> Result<Dataset> {
        let records = rows
            .iter()
            .map(|&row| {
                self.records.get(row).cloned().ok_or_else(|| {
                    VerdictError::invalid_argument(format!(
                        "row {row} out of range for dataset of {} records",
                        self.records.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Dataset {
            columns: self.columns.clone(),
            records,
        })
    }

    /// Return a copy with `label_field` set on each predicted row.
    ///
    /// Labels are written as integers 0/1. Rows without a prediction keep
    /// their original value. The receiver is not modified.
    pub fn with_predictions<I>(&self, label_field: &str, predictions: I) -> Result<Dataset>
    where
        I: IntoIterator<Item = (usize, Label)>,
    {
        let mut output = self.clone();
        if !output.has_column(label_field) {
            output.columns.push(label_field.to_string());
        }

        for (row, label) in predictions {
            let len = output.records.len();
            let record = output.records.get_mut(row).ok_or_else(|| {
                VerdictError::invalid_argument(format!(
                    "prediction for row {row} but the dataset has {len} records"
                ))
            })?;
            record.add_field(label_field, FieldValue::Integer(i64::from(label.as_u8())));
        }

        Ok(output)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
