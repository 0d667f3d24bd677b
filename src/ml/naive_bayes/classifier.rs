//! Bernoulli Naive Bayes scoring.
//!
//! A document is scored against every term of the training vocabulary:
//! present terms multiply in `P(t | c)`, absent terms multiply in
//! `1 - P(t | c)`. Term presence is decided by a separate filter vocabulary
//! built from the test-side corpus; a term counts as present only if it is
//! in the document *and* survived pruning on the test side.

use bit_vec::BitVec;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::estimator::{ClassStatistics, ParameterEstimator};
use super::types::Label;
use super::vocabulary::{Vocabulary, VocabularyBuilder};
use crate::error::Result;

/// Single-document label prediction against a test-side filter.
///
/// Batch scoring in the harness goes through
/// [`BernoulliNaiveBayes::score_batch`], which also returns the class scores.
pub trait TextClassifier: Send + Sync {
    /// Predict the label of a cleaned document, using `filter` for term presence.
    fn predict(&self, cleaned: &str, filter: &Vocabulary) -> Result<Label>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// How class scores are accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Product of probabilities. Underflows to zero on large vocabularies.
    #[default]
    Direct,
    /// Sum of log probabilities. Same ranking while the direct product is representable.
    LogSpace,
}

/// Per-class scores of one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub not_guilty: f64,
    pub guilty: f64,
    pub mode: ScoringMode,
}

impl ClassScores {
    /// Score of `label`.
    pub fn score(&self, label: Label) -> f64 {
        match label {
            Label::NotGuilty => self.not_guilty,
            Label::Guilty => self.guilty,
        }
    }

    /// Higher-scoring label; ties go to [`Label::NotGuilty`].
    pub fn label(&self) -> Label {
        if self.not_guilty >= self.guilty {
            Label::NotGuilty
        } else {
            Label::Guilty
        }
    }
}

/// A trained Bernoulli Naive Bayes model.
#[derive(Debug, Clone)]
pub struct BernoulliNaiveBayes {
    vocabulary: Vocabulary,
    statistics: ClassStatistics,
    mode: ScoringMode,
}

impl BernoulliNaiveBayes {
    /// Train on cleaned documents and their labels.
    pub fn train<S>(documents: &[S], labels: &[Label], min_doc_freq: usize) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let (vocabulary, presence) = VocabularyBuilder::new(min_doc_freq)?.build(documents)?;
        let statistics = ParameterEstimator::estimate(&presence, &vocabulary, labels)?;
        Ok(Self::from_parts(vocabulary, statistics))
    }

    /// Assemble a model from an existing vocabulary and its statistics.
    pub fn from_parts(vocabulary: Vocabulary, statistics: ClassStatistics) -> Self {
        Self {
            vocabulary,
            statistics,
            mode: ScoringMode::Direct,
        }
    }

    /// Switch the scoring mode.
    pub fn with_scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    /// The training vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The estimated class statistics.
    pub fn statistics(&self) -> &ClassStatistics {
        &self.statistics
    }

    /// The scoring mode in use.
    pub fn scoring_mode(&self) -> ScoringMode {
        self.mode
    }

    /// Presence of each training term in `cleaned`, restricted to `filter`.
    pub fn presence(&self, cleaned: &str, filter: &Vocabulary) -> BitVec {
        let mut row = BitVec::from_elem(self.vocabulary.len(), false);
        for term in cleaned.split_whitespace() {
            if !filter.contains(term) {
                continue;
            }
            if let Some(i) = self.vocabulary.index_of(term) {
                row.set(i, true);
            }
        }
        row
    }

    /// Score a presence row over the training vocabulary.
    ///
    /// Every column is visited exactly once, in vocabulary order.
    pub fn score_presence(&self, present: &BitVec) -> ClassScores {
        let [not_guilty, guilty] = Label::ALL.map(|label| {
            let class = self.statistics.class(label);
            let factors = class.conditional.iter().enumerate().map(|(i, &p)| {
                if present.get(i).unwrap_or(false) {
                    p
                } else {
                    1.0 - p
                }
            });

            match self.mode {
                ScoringMode::Direct => factors.fold(class.prior, |score, f| score * f),
                ScoringMode::LogSpace => factors.fold(class.prior.ln(), |score, f| score + f.ln()),
            }
        });

        ClassScores {
            not_guilty,
            guilty,
            mode: self.mode,
        }
    }

    /// Score a cleaned document.
    pub fn score(&self, cleaned: &str, filter: &Vocabulary) -> ClassScores {
        self.score_presence(&self.presence(cleaned, filter))
    }

    /// Classify a cleaned document.
    pub fn classify(&self, cleaned: &str, filter: &Vocabulary) -> Label {
        self.score(cleaned, filter).label()
    }

    /// Score many documents independently, preserving input order.
    pub fn score_batch<S>(&self, documents: &[S], filter: &Vocabulary) -> Vec<ClassScores>
    where
        S: AsRef<str> + Sync,
    {
        debug!(
            "scoring {} documents over {} training terms ({} filter terms)",
            documents.len(),
            self.vocabulary.len(),
            filter.len()
        );
        documents
            .par_iter()
            .map(|doc| self.score(doc.as_ref(), filter))
            .collect()
    }
}

impl TextClassifier for BernoulliNaiveBayes {
    fn predict(&self, cleaned: &str, filter: &Vocabulary) -> Result<Label> {
        Ok(self.classify(cleaned, filter))
    }

    fn name(&self) -> &str {
        "bernoulli_naive_bayes"
    }
}
