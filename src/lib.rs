//! # Verdict
//!
//! Bernoulli Naive Bayes classification of free-text case-outcome narratives
//! into a binary guilt label.
//!
//! ## Features
//!
//! - Narrative normalization pipeline (lowercase, punctuation, stop words)
//! - Document-frequency pruned bag-of-words vocabulary with presence semantics
//! - Laplace-smoothed Bernoulli Naive Bayes with direct or log-space scoring
//! - Seeded train/test evaluation and production labeling
//! - CSV and JSONL datasets
//!
//! ## Example
//!
//! ```
//! use verdict::prelude::*;
//!
//! let analyzer = NarrativeAnalyzer::new();
//! let raw = ["Charges were dismissed.", "He pleaded GUILTY.", "Charges dismissed", "Pleaded guilty"];
//! let cleaned: Vec<String> = raw.iter().map(|r| analyzer.normalize(r).unwrap()).collect();
//! let labels = [Label::NotGuilty, Label::Guilty, Label::NotGuilty, Label::Guilty];
//!
//! let model = BernoulliNaiveBayes::train(&cleaned, &labels, 1).unwrap();
//! let test = vec![analyzer.normalize("Defendant pleaded guilty").unwrap()];
//! let filter = VocabularyBuilder::new(1).unwrap().build_filter(&test);
//!
//! assert_eq!(model.classify(&test[0], &filter), Label::Guilty);
//! ```

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, NarrativeAnalyzer};
    pub use crate::dataset::{Dataset, DatasetSchema};
    pub use crate::error::{Result, VerdictError};
    pub use crate::ml::naive_bayes::{
        BernoulliNaiveBayes, ClassScores, Label, ScoringMode, TextClassifier, Vocabulary,
        VocabularyBuilder,
    };
    pub use crate::pipeline::{EvaluationReport, Harness, NaiveBayesConfig, PredictionReport};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
