//! Error types for the Verdict library.
//!
//! All errors are represented by the [`VerdictError`] enum. The first four
//! variants are the training validations: they abort a run before any model
//! is used and carry the number of affected records so the driver can report
//! how much of the dataset failed.
//!
//! # Examples
//!
//! ```
//! use verdict::error::{Result, VerdictError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VerdictError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::naive_bayes::Label;

/// The main error type for Verdict operations.
#[derive(Error, Debug)]
pub enum VerdictError {
    /// A training document carries a label outside {0, 1}.
    #[error("Invalid label in {records} training record(s): {detail}")]
    InvalidLabel { records: usize, detail: String },

    /// The training split has no documents for one of the two classes.
    #[error(
        "Empty class: no training documents labeled {label} ({training_documents} training documents total)"
    )]
    EmptyClass {
        label: Label,
        training_documents: usize,
    },

    /// Pruning removed every term from the vocabulary.
    #[error(
        "Empty vocabulary: no term appears in at least {min_doc_freq} of {documents} document(s)"
    )]
    EmptyVocabulary { min_doc_freq: usize, documents: usize },

    /// A record is missing the text or label field.
    #[error("Malformed record(s): {records} record(s) affected: {detail}")]
    MalformedRecord { records: usize, detail: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Analysis-related errors (char filters, tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VerdictError.
pub type Result<T> = std::result::Result<T, VerdictError>;

impl VerdictError {
    /// Create a new invalid label error.
    pub fn invalid_label<S: Into<String>>(records: usize, detail: S) -> Self {
        VerdictError::InvalidLabel {
            records,
            detail: detail.into(),
        }
    }

    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(records: usize, detail: S) -> Self {
        VerdictError::MalformedRecord {
            records,
            detail: detail.into(),
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        VerdictError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VerdictError::InvalidArgument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VerdictError::Analysis(msg.into())
    }

    /// Create a new CSV error.
    pub fn csv<S: Into<String>>(msg: S) -> Self {
        VerdictError::Csv(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VerdictError::Other(msg.into())
    }

    /// Whether this error is one of the training validations that abort a run.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            VerdictError::InvalidLabel { .. }
                | VerdictError::EmptyClass { .. }
                | VerdictError::EmptyVocabulary { .. }
                | VerdictError::MalformedRecord { .. }
        )
    }
}

impl From<csv::Error> for VerdictError {
    fn from(err: csv::Error) -> Self {
        VerdictError::Csv(err.to_string())
    }
}
