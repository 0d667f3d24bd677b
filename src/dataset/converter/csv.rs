//! CSV format dataset converter.
//!
//! The first row contains field names:
//! ```csv
//! case_id,outcome,guilty
//! A-1,"Pleaded guilty, fined $500",1
//! A-2,Charges dismissed,0
//! A-3,Pending hearing,unknown
//! ```

use std::io::{Read, Write};

use csv::{ReaderBuilder, WriterBuilder};

use crate::dataset::Dataset;
use crate::dataset::converter::DatasetConverter;
use crate::dataset::field_value::FieldValue;
use crate::dataset::record::Record;
use crate::error::{Result, VerdictError};

/// A dataset converter for CSV format.
///
/// Cells are type-inferred (boolean, integer, float, text) only where the
/// typed value writes back as the same text; empty cells become
/// [`FieldValue::Null`] so every record keeps every column.
#[derive(Debug, Clone)]
pub struct CsvDatasetConverter {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
}

impl Default for CsvDatasetConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetConverter {
    /// Create a new CSV converter with comma delimiter.
    pub fn new() -> Self {
        CsvDatasetConverter {
            delimiter: b',',
            trim: true,
        }
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl DatasetConverter for CsvDatasetConverter {
    fn read<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| VerdictError::csv(format!("Failed to read CSV headers: {e}")))?
            .clone();

        if headers.is_empty() {
            return Err(VerdictError::csv("CSV header is empty"));
        }

        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let mut dataset = Dataset::new(columns.clone());

        for (row, result) in reader.records().enumerate() {
            let record = result
                .map_err(|e| VerdictError::csv(format!("Failed to read CSV row {row}: {e}")))?;

            let mut fields = Record::new();
            for (name, value) in columns.iter().zip(record.iter()) {
                fields.add_field(name.as_str(), FieldValue::infer(value));
            }
            dataset.push(fields);
        }

        Ok(dataset)
    }

    fn write<W: Write>(&self, dataset: &Dataset, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        writer.write_record(dataset.columns())?;
        for record in dataset {
            writer.write_record(dataset.columns().iter().map(|column| {
                record
                    .get_field(column)
                    .map(FieldValue::to_string)
                    .unwrap_or_default()
            }))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Dataset> {
        CsvDatasetConverter::new().read(input.as_bytes())
    }

    #[test]
    fn test_csv_type_inference() {
        let dataset = read("outcome,guilty,fine,sealed\nPleaded guilty,1,250.5,false").unwrap();
        let record = dataset.get(0).unwrap();

        assert_eq!(record.get_field("outcome").unwrap().as_text(), Some("Pleaded guilty"));
        assert_eq!(record.get_field("guilty"), Some(&FieldValue::Integer(1)));
        assert_eq!(record.get_field("fine"), Some(&FieldValue::Float(250.5)));
        assert_eq!(record.get_field("sealed"), Some(&FieldValue::Boolean(false)));
        assert_eq!(dataset.columns(), &["outcome", "guilty", "fine", "sealed"]);
    }

    #[test]
    fn test_csv_quoted_fields() {
        let dataset = read("outcome,guilty\n\"Guilty, fined \"\"heavily\"\"\",1").unwrap();
        assert_eq!(
            dataset.get(0).unwrap().get_field("outcome").unwrap().as_text(),
            Some("Guilty, fined \"heavily\"")
        );
    }

    #[test]
    fn test_csv_empty_cells_are_null() {
        let dataset = read("outcome,guilty\n,unknown\n  Dismissed  ,").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().get_field("outcome"), Some(&FieldValue::Null));
        assert_eq!(
            dataset.get(1).unwrap().get_field("outcome").unwrap().as_text(),
            Some("Dismissed")
        );
        assert_eq!(dataset.get(1).unwrap().get_field("guilty"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_csv_header_only() {
        let dataset = read("outcome,guilty\n").unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns().len(), 2);
    }

    #[test]
    fn test_csv_field_count_mismatch() {
        assert!(matches!(read("outcome,guilty\nDismissed"), Err(VerdictError::Csv(_))));
    }

    #[test]
    fn test_csv_write() {
        let dataset = read("outcome,guilty\n\"Fined, released\",1\nPending,").unwrap();
        let mut output = Vec::new();
        CsvDatasetConverter::new().write(&dataset, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "outcome,guilty\n\"Fined, released\",1\nPending,\n"
        );
    }

    #[test]
    fn test_csv_write_preserves_untouched_cells() {
        let input = "case_id,outcome,guilty\n007,Pleaded guilty,1\n1e3,Dismissed,0\nA-3,Pending,TRUE\n";
        let dataset = read(input).unwrap();
        let mut output = Vec::new();
        CsvDatasetConverter::new().write(&dataset, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), input);
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let dataset = CsvDatasetConverter::new()
            .with_delimiter(b'\t')
            .read("outcome\tguilty\nDismissed\t0".as_bytes())
            .unwrap();
        assert_eq!(dataset.get(0).unwrap().get_field("guilty"), Some(&FieldValue::Integer(0)));
    }
}
