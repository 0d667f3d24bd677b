//! A single dataset row.

use std::collections::HashMap;

use crate::dataset::field_value::FieldValue;

/// One row of a dataset: a collection of named field values.
///
/// A record's identity is its row index in the owning [`Dataset`](crate::dataset::Dataset).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create a new empty record.
    pub fn new() -> Self {
        Record {
            fields: HashMap::new(),
        }
    }

    /// Add a field value to the record, replacing any previous value.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Builder-style [`add_field`](Record::add_field).
    pub fn with_field<S: Into<String>, V: Into<FieldValue>>(mut self, name: S, value: V) -> Self {
        self.add_field(name, value.into());
        self
    }

    /// Get a field value from the record.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check if the record has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names, in no particular order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Get all field values.
    pub fn fields(&self) -> &HashMap<String, FieldValue> {
        &self.fields
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
