//! Classification pipeline: configuration, train/test harness and reports.
//!
//! # Example
//!
//! ```
//! use verdict::dataset::{Dataset, DatasetSchema};
//! use verdict::dataset::record::Record;
//! use verdict::ml::naive_bayes::Label;
//! use verdict::pipeline::{Harness, NaiveBayesConfig};
//!
//! let mut records = Vec::new();
//! for _ in 0..3 {
//!     records.push(Record::new().with_field("outcome", "Charges dismissed").with_field("guilty", 0i64));
//!     records.push(Record::new().with_field("outcome", "Pleaded guilty").with_field("guilty", 1i64));
//! }
//! records.push(Record::new().with_field("outcome", "Pleaded guilty, fined").with_field("guilty", "unknown"));
//! let dataset = Dataset::from_records(records);
//!
//! let config = NaiveBayesConfig { min_doc_freq: 1, ..Default::default() };
//! let harness = Harness::new(config, DatasetSchema::default()).unwrap();
//! let report = harness.classify_dataset(&dataset).unwrap();
//!
//! assert_eq!(report.labels().collect::<Vec<_>>(), vec![(6, Label::Guilty)]);
//! ```

pub mod config;
pub mod harness;
pub mod types;

pub use config::NaiveBayesConfig;
pub use harness::{Harness, evaluate, predict_unlabeled, split_indices};
pub use types::{ConfusionMatrix, EvaluationReport, Prediction, PredictionReport, RecordFailure};
