//! Field value types for dataset records.
//!
//! CSV cells arrive as strings and are type-inferred; JSONL values keep the
//! type JSON gave them.
//!
//! ```
//! use verdict::dataset::field_value::FieldValue;
//!
//! assert_eq!(FieldValue::infer("1"), FieldValue::Integer(1));
//! assert_eq!(FieldValue::infer("unknown"), FieldValue::Text("unknown".to_string()));
//! assert_eq!(FieldValue::infer(""), FieldValue::Null);
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a value for a field in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Null value
    Null,
}

impl FieldValue {
    /// Infer the field value type from a raw string cell.
    ///
    /// Empty cells are null. A cell is typed only when the typed value
    /// renders back to the same text, so `"007"`, `"1e3"` and `"TRUE"` stay
    /// text and survive a read-write cycle unchanged. Non-finite floats
    /// (`"nan"`, `"inf"`) also stay text.
    pub fn infer(value: &str) -> Self {
        if value.is_empty() {
            return FieldValue::Null;
        }

        match value {
            "true" => return FieldValue::Boolean(true),
            "false" => return FieldValue::Boolean(false),
            _ => {}
        }

        if let Ok(int_val) = value.parse::<i64>()
            && int_val.to_string() == value
        {
            return FieldValue::Integer(int_val);
        }

        if let Ok(float_val) = value.parse::<f64>()
            && float_val.is_finite()
            && float_val.to_string() == value
        {
            return FieldValue::Float(float_val);
        }

        FieldValue::Text(value.to_string())
    }

    /// Convert a JSON value, keeping its JSON type.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Null => Value::Null,
        }
    }

    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean, if it is one.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual form of a scalar; `None` for null.
    ///
    /// A narrative that happened to look like a number in a CSV cell is
    /// turned back into its text here.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(s) => Some(Cow::Borrowed(s)),
            FieldValue::Null => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(FieldValue::infer("true"), FieldValue::Boolean(true));
        assert_eq!(FieldValue::infer("0"), FieldValue::Integer(0));
        assert_eq!(FieldValue::infer("19.5"), FieldValue::Float(19.5));
        assert_eq!(FieldValue::infer("nan"), FieldValue::Text("nan".to_string()));
        assert_eq!(
            FieldValue::infer("Found guilty"),
            FieldValue::Text("Found guilty".to_string())
        );
    }

    #[test]
    fn test_infer_keeps_text_that_would_not_render_back() {
        for raw in ["007", "+1", "1e3", "2.50", "TRUE", "False"] {
            let value = FieldValue::infer(raw);
            assert_eq!(value, FieldValue::Text(raw.to_string()), "{raw}");
            assert_eq!(value.to_string(), raw);
        }
        assert_eq!(FieldValue::infer("-12"), FieldValue::Integer(-12));
    }

    #[test]
    fn test_json_conversion() {
        let value: Value = serde_json::json!({"a": 1, "b": "1", "c": null, "d": 2.5, "e": [1]});
        assert_eq!(FieldValue::from_json(&value["a"]), FieldValue::Integer(1));
        assert_eq!(FieldValue::from_json(&value["b"]), FieldValue::Text("1".to_string()));
        assert_eq!(FieldValue::from_json(&value["c"]), FieldValue::Null);
        assert_eq!(FieldValue::from_json(&value["d"]), FieldValue::Float(2.5));
        assert_eq!(FieldValue::from_json(&value["e"]), FieldValue::Text("[1]".to_string()));

        assert_eq!(FieldValue::Integer(1).to_json(), serde_json::json!(1));
        assert_eq!(FieldValue::Float(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(FieldValue::Integer(42).to_text().as_deref(), Some("42"));
        assert_eq!(FieldValue::from("plea").to_text().as_deref(), Some("plea"));
        assert_eq!(FieldValue::Null.to_text(), None);
    }

    #[test]
    fn test_blank() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("  ").is_blank());
        assert!(!FieldValue::Integer(0).is_blank());
        assert_eq!(FieldValue::Null.to_string(), "");
    }
}
