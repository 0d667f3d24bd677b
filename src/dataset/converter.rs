//! Dataset converters for reading and writing files.
//!
//! This module provides a [`DatasetConverter`] trait and implementations for
//! CSV and JSONL. [`DatasetFormat`] picks one from a file extension.
//!
//! # Example
//!
//! ```no_run
//! use verdict::dataset::converter::DatasetConverter;
//! use verdict::dataset::converter::csv::CsvDatasetConverter;
//!
//! let converter = CsvDatasetConverter::new();
//! let dataset = converter.read_path("outcomes.csv").unwrap();
//! println!("{} records", dataset.len());
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{Result, VerdictError};

pub mod csv;
pub mod jsonl;

use self::csv::CsvDatasetConverter;
use self::jsonl::JsonlDatasetConverter;

/// A trait for converting between a file format and a [`Dataset`].
pub trait DatasetConverter {
    /// Read every record from `reader`.
    fn read<R: Read>(&self, reader: R) -> Result<Dataset>;

    /// Write every record of `dataset` to `writer`.
    fn write<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<()>;

    /// Read a dataset from a file.
    fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Write a dataset to a file.
    ///
    /// The whole output is rendered in memory first, so a failure while
    /// encoding leaves no partial file behind.
    fn write_path<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<()> {
        let mut buffer = Vec::new();
        self.write(dataset, &mut buffer)?;
        fs::write(path.as_ref(), buffer)?;
        Ok(())
    }
}

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Jsonl,
}

impl DatasetFormat {
    /// Pick the format from the file extension (`.csv`, `.jsonl`, `.ndjson`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(DatasetFormat::Csv),
            Some("jsonl") | Some("ndjson") => Ok(DatasetFormat::Jsonl),
            _ => Err(VerdictError::invalid_argument(format!(
                "cannot tell the dataset format of '{}': expected a .csv, .jsonl or .ndjson file",
                path.display()
            ))),
        }
    }

    /// Read a dataset in this format.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        match self {
            DatasetFormat::Csv => CsvDatasetConverter::new().read_path(path),
            DatasetFormat::Jsonl => JsonlDatasetConverter::new().read_path(path),
        }
    }

    /// Write a dataset in this format.
    pub fn write<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<()> {
        match self {
            DatasetFormat::Csv => CsvDatasetConverter::new().write_path(dataset, path),
            DatasetFormat::Jsonl => JsonlDatasetConverter::new().write_path(dataset, path),
        }
    }
}
