//! Common types for guilt classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerdictError};

/// Binary case outcome.
///
/// Serialized as its numeric value, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    /// `0`
    NotGuilty,
    /// `1`
    Guilty,
}

impl Label {
    /// Both labels, ordered by numeric value.
    pub const ALL: [Label; 2] = [Label::NotGuilty, Label::Guilty];

    /// Numeric value of the label.
    pub fn as_u8(self) -> u8 {
        match self {
            Label::NotGuilty => 0,
            Label::Guilty => 1,
        }
    }

    /// Position of the label in per-class tables.
    pub fn index(self) -> usize {
        self.as_u8() as usize
    }

    /// Parse a numeric label, accepting only 0 and 1.
    pub fn from_i64(value: i64) -> Option<Label> {
        match value {
            0 => Some(Label::NotGuilty),
            1 => Some(Label::Guilty),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = VerdictError;

    fn try_from(value: u8) -> Result<Self> {
        Label::from_i64(i64::from(value))
            .ok_or_else(|| VerdictError::invalid_label(1, format!("{value} is not 0 or 1")))
    }
}
