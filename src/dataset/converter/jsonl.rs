//! JSONL format dataset converter.
//!
//! Each line is a single JSON object:
//! ```jsonl
//! {"case_id": "A-1", "outcome": "Pleaded guilty, fined $500", "guilty": 1}
//! {"case_id": "A-3", "outcome": "Pending hearing", "guilty": "unknown"}
//! ```

use std::io::{BufRead, BufReader, Read, Write};

use serde_json::{Map, Value};

use crate::dataset::Dataset;
use crate::dataset::converter::DatasetConverter;
use crate::dataset::field_value::FieldValue;
use crate::dataset::record::Record;
use crate::error::{Result, VerdictError};

/// A dataset converter for JSONL format.
///
/// JSON values keep their JSON type; strings are never re-inferred, so a
/// `"1"` label stays text (and is still accepted as a label).
#[derive(Debug, Clone, Default)]
pub struct JsonlDatasetConverter;

impl JsonlDatasetConverter {
    /// Create a new JSONL converter.
    pub fn new() -> Self {
        JsonlDatasetConverter
    }

    /// Parse a single JSON line into a Record.
    fn parse_json_line(&self, line: &str, line_number: usize) -> Result<Record> {
        let value: Value = serde_json::from_str(line).map_err(|e| {
            VerdictError::malformed_record(1, format!("line {line_number}: {e}"))
        })?;

        let Value::Object(map) = value else {
            return Err(VerdictError::malformed_record(
                1,
                format!("line {line_number}: expected a JSON object"),
            ));
        };

        let mut record = Record::new();
        for (key, val) in &map {
            record.add_field(key.as_str(), FieldValue::from_json(val));
        }
        Ok(record)
    }
}

impl DatasetConverter for JsonlDatasetConverter {
    fn read<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut dataset = Dataset::default();

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue; // Skip empty lines
            }
            dataset.push(self.parse_json_line(line, index + 1)?);
        }

        Ok(dataset)
    }

    fn write<W: Write>(&self, dataset: &Dataset, mut writer: W) -> Result<()> {
        for record in dataset {
            let mut object = Map::new();
            for column in dataset.columns() {
                if let Some(value) = record.get_field(column) {
                    object.insert(column.clone(), value.to_json());
                }
            }
            serde_json::to_writer(&mut writer, &Value::Object(object))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    use tempfile::NamedTempFile;

    #[test]
    fn test_jsonl_read_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"outcome": "Pleaded guilty", "guilty": 1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"outcome": null, "guilty": "unknown"}}"#).unwrap();
        file.flush().unwrap();

        let dataset = JsonlDatasetConverter::new().read_path(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().get_field("guilty"), Some(&FieldValue::Integer(1)));
        assert_eq!(dataset.get(1).unwrap().get_field("outcome"), Some(&FieldValue::Null));
        assert_eq!(
            dataset.get(1).unwrap().get_field("guilty"),
            Some(&FieldValue::Text("unknown".to_string()))
        );
    }

    #[test]
    fn test_jsonl_strings_not_inferred() {
        let dataset = JsonlDatasetConverter::new()
            .read(r#"{"outcome": "true", "guilty": "1"}"#.as_bytes())
            .unwrap();
        let record = dataset.get(0).unwrap();
        assert_eq!(record.get_field("outcome").unwrap().as_text(), Some("true"));
        assert_eq!(record.get_field("guilty").unwrap().as_text(), Some("1"));
    }

    #[test]
    fn test_jsonl_rejects_non_objects() {
        let result = JsonlDatasetConverter::new().read("{\"guilty\": 1}\n[1, 2]\n".as_bytes());
        match result {
            Err(VerdictError::MalformedRecord { detail, .. }) => assert!(detail.contains("line 2")),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
        assert!(JsonlDatasetConverter::new().read("{oops".as_bytes()).is_err());
    }

    #[test]
    fn test_jsonl_write() {
        let dataset = Dataset::from_records(vec![
            Record::new()
                .with_field("outcome", "Dismissed")
                .with_field("guilty", 0i64),
        ]);
        let mut output = Vec::new();
        JsonlDatasetConverter::new().write(&dataset, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "{\"guilty\":0,\"outcome\":\"Dismissed\"}\n"
        );
    }
}
