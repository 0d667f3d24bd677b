//! Bernoulli Naive Bayes text classification over a bag-of-words presence model.
//!
//! # Architecture
//!
//! - [`VocabularyBuilder`]: cleaned documents → pruned [`Vocabulary`] + [`PresenceMatrix`]
//! - [`ParameterEstimator`]: presence matrix + labels → [`ClassStatistics`]
//! - [`BernoulliNaiveBayes`]: scores a document over the training vocabulary
//! - [`TextClassifier`] trait: single-document prediction
//!
//! # Example
//!
//! ```
//! use verdict::ml::naive_bayes::{BernoulliNaiveBayes, Label, VocabularyBuilder};
//!
//! let docs: Vec<String> = vec![
//!     "charges dismissed".into(),
//!     "charges dismissed".into(),
//!     "pleaded guilty".into(),
//!     "pleaded guilty".into(),
//! ];
//! let labels = vec![Label::NotGuilty, Label::NotGuilty, Label::Guilty, Label::Guilty];
//!
//! let model = BernoulliNaiveBayes::train(&docs, &labels, 1).unwrap();
//! let filter = VocabularyBuilder::new(1).unwrap().build_filter(&["pleaded guilty"]);
//!
//! assert_eq!(model.classify("pleaded guilty", &filter), Label::Guilty);
//! ```

mod classifier;
mod estimator;
mod types;
mod vocabulary;

pub use classifier::{BernoulliNaiveBayes, ClassScores, ScoringMode, TextClassifier};
pub use estimator::{ClassStatistics, ClassStats, ParameterEstimator};
pub use types::Label;
pub use vocabulary::{PresenceMatrix, Vocabulary, VocabularyBuilder};
