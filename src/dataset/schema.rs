//! Field addressing for narrative datasets.
//!
//! A [`DatasetSchema`] names the narrative field and the label field once, and
//! is validated at pipeline entry so a missing field fails the run up front
//! instead of surfacing halfway through scoring.

use std::borrow::Cow;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::dataset::field_value::FieldValue;
use crate::dataset::record::Record;
use crate::error::{Result, VerdictError};
use crate::ml::naive_bayes::Label;

/// Default narrative field name.
pub const DEFAULT_TEXT_FIELD: &str = "outcome";
/// Default label field name.
pub const DEFAULT_LABEL_FIELD: &str = "guilty";
/// Default label value marking a record as unlabeled.
pub const DEFAULT_UNLABELED_SENTINEL: &str = "unknown";

/// Label state of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLabel {
    /// 0 or 1.
    Known(Label),
    /// The sentinel, null or an empty value.
    Unlabeled,
    /// Anything else; carries the offending value.
    Invalid(String),
    /// The record has no label field at all.
    Missing,
}

/// Rows of a dataset split by label state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// `(row, label)` for every labeled record, in row order.
    pub labeled: Vec<(usize, Label)>,
    /// Rows of unlabeled records, in row order.
    pub unlabeled: Vec<usize>,
}

/// Which fields of a record hold the narrative and the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSchema {
    pub text_field: String,
    pub label_field: String,
    pub unlabeled_sentinel: String,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        DatasetSchema {
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            unlabeled_sentinel: DEFAULT_UNLABELED_SENTINEL.to_string(),
        }
    }
}

impl DatasetSchema {
    /// Create a schema with the default sentinel.
    pub fn new<T: Into<String>, L: Into<String>>(text_field: T, label_field: L) -> Self {
        DatasetSchema {
            text_field: text_field.into(),
            label_field: label_field.into(),
            ..Default::default()
        }
    }

    /// Set the unlabeled sentinel.
    pub fn with_sentinel<S: Into<String>>(mut self, sentinel: S) -> Self {
        self.unlabeled_sentinel = sentinel.into();
        self
    }

    /// Fail with [`VerdictError::MalformedRecord`] if any record lacks the
    /// text field, or the label field when `require_label` is set.
    pub fn check_fields(&self, dataset: &Dataset, require_label: bool) -> Result<()> {
        let mut missing = 0;
        let mut first = None;

        for (row, record) in dataset.iter().enumerate() {
            let lacks_text = !record.has_field(&self.text_field);
            let lacks_label = require_label && !record.has_field(&self.label_field);
            if lacks_text || lacks_label {
                missing += 1;
                if first.is_none() {
                    let field = if lacks_text {
                        &self.text_field
                    } else {
                        &self.label_field
                    };
                    first = Some((row, field.clone()));
                }
            }
        }

        match first {
            None => Ok(()),
            Some((row, field)) => Err(VerdictError::malformed_record(
                missing,
                format!("missing required field '{field}' (first at row {row})"),
            )),
        }
    }

    /// Interpret a label value.
    pub fn label_value(&self, value: &FieldValue) -> RecordLabel {
        if value.is_blank() {
            return RecordLabel::Unlabeled;
        }
        match value {
            FieldValue::Integer(i) => match Label::from_i64(*i) {
                Some(label) => RecordLabel::Known(label),
                None => RecordLabel::Invalid(i.to_string()),
            },
            FieldValue::Boolean(true) => RecordLabel::Known(Label::Guilty),
            FieldValue::Boolean(false) => RecordLabel::Known(Label::NotGuilty),
            FieldValue::Text(s) => match s.trim() {
                "0" => RecordLabel::Known(Label::NotGuilty),
                "1" => RecordLabel::Known(Label::Guilty),
                t if t == self.unlabeled_sentinel => RecordLabel::Unlabeled,
                _ => RecordLabel::Invalid(s.clone()),
            },
            other => RecordLabel::Invalid(other.to_string()),
        }
    }

    /// Label state of a record.
    pub fn label_of(&self, record: &Record) -> RecordLabel {
        record
            .get_field(&self.label_field)
            .map(|value| self.label_value(value))
            .unwrap_or(RecordLabel::Missing)
    }

    /// Narrative of a record; `None` when the field is missing or null.
    pub fn text_of<'a>(&self, record: &'a Record) -> Option<Cow<'a, str>> {
        record.get_field(&self.text_field).and_then(FieldValue::to_text)
    }

    /// Split rows into labeled and unlabeled.
    ///
    /// Every record needs the label field, and labeled records also need the
    /// text field; unlabeled records are passed through whatever they hold so
    /// prediction can report them one by one. Every present label must be
    /// 0, 1 or unlabeled. Violations reject the whole dataset with the number
    /// of offending records.
    pub fn partition(&self, dataset: &Dataset) -> Result<Partition> {
        let mut partition = Partition::default();
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        for (row, record) in dataset.iter().enumerate() {
            match self.label_of(record) {
                RecordLabel::Known(_) if !record.has_field(&self.text_field) => {
                    missing.push((row, &self.text_field))
                }
                RecordLabel::Known(label) => partition.labeled.push((row, label)),
                RecordLabel::Unlabeled => partition.unlabeled.push(row),
                RecordLabel::Invalid(value) => invalid.push((row, value)),
                RecordLabel::Missing => missing.push((row, &self.label_field)),
            }
        }

        if let Some((row, field)) = missing.first() {
            return Err(VerdictError::malformed_record(
                missing.len(),
                format!("missing required field '{field}' (first at row {row})"),
            ));
        }

        if let Some((row, value)) = invalid.first() {
            return Err(VerdictError::invalid_label(
                invalid.len(),
                format!(
                    "field '{}' must be 0, 1 or '{}'; found '{value}' at row {row}",
                    self.label_field, self.unlabeled_sentinel
                ),
            ));
        }

        if !partition.unlabeled.is_empty() {
            warn!(
                "{} of {} records are unlabeled",
                partition.unlabeled.len(),
                dataset.len()
            );
        }

        Ok(partition)
    }
}
