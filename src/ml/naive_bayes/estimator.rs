//! Class priors and Laplace-smoothed conditional probabilities.

use log::debug;

use super::types::Label;
use super::vocabulary::{PresenceMatrix, Vocabulary};
use crate::error::{Result, VerdictError};

/// Statistics for a single class.
#[derive(Debug, Clone)]
pub struct ClassStats {
    /// The class these statistics describe.
    pub label: Label,
    /// Number of training documents with this label (`N_c`).
    pub document_count: usize,
    /// `N_c / N_total`.
    pub prior: f64,
    /// `P(term | c)` per vocabulary column.
    pub conditional: Vec<f64>,
}

/// Priors and conditional probabilities for both classes.
#[derive(Debug, Clone)]
pub struct ClassStatistics {
    total_documents: usize,
    classes: [ClassStats; 2],
}

impl ClassStatistics {
    /// Total training documents across both classes.
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Statistics of one class.
    pub fn class(&self, label: Label) -> &ClassStats {
        &self.classes[label.index()]
    }

    /// Prior probability of `label`.
    pub fn prior(&self, label: Label) -> f64 {
        self.class(label).prior
    }

    /// Training documents labeled `label`.
    pub fn document_count(&self, label: Label) -> usize {
        self.class(label).document_count
    }

    /// `P(term | label)` for vocabulary column `term`.
    pub fn conditional(&self, label: Label, term: usize) -> Option<f64> {
        self.class(label).conditional.get(term).copied()
    }

    /// Number of vocabulary columns the tables cover.
    pub fn vocabulary_size(&self) -> usize {
        self.classes[0].conditional.len()
    }
}

/// Estimates [`ClassStatistics`] from a labeled presence matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterEstimator;

impl ParameterEstimator {
    /// Estimate priors and smoothed conditionals.
    ///
    /// For class `c` and term `t`:
    /// `P(t | c) = (docs of class c containing t + 1) / (N_c + 2)`.
    /// The denominator adds one per presence outcome, not the vocabulary size.
    pub fn estimate(
        presence: &PresenceMatrix,
        vocabulary: &Vocabulary,
        labels: &[Label],
    ) -> Result<ClassStatistics> {
        if presence.len() != labels.len() {
            return Err(VerdictError::invalid_argument(format!(
                "{} presence rows but {} labels",
                presence.len(),
                labels.len()
            )));
        }
        if presence.width() != vocabulary.len() {
            return Err(VerdictError::invalid_argument(format!(
                "presence matrix has {} columns but the vocabulary has {} terms",
                presence.width(),
                vocabulary.len()
            )));
        }

        let total_documents = labels.len();
        let mut document_counts = [0usize; 2];
        let mut term_counts = [vec![0usize; vocabulary.len()], vec![0usize; vocabulary.len()]];

        for (row, label) in presence.rows().iter().zip(labels) {
            let c = label.index();
            document_counts[c] += 1;
            for (term, present) in row.iter().enumerate() {
                if present {
                    term_counts[c][term] += 1;
                }
            }
        }

        for label in Label::ALL {
            if document_counts[label.index()] == 0 {
                return Err(VerdictError::EmptyClass {
                    label,
                    training_documents: total_documents,
                });
            }
        }

        let classes = Label::ALL.map(|label| {
            let c = label.index();
            let n_c = document_counts[c];
            let denominator = (n_c + 2) as f64;
            let conditional = term_counts[c]
                .iter()
                .map(|&count| (count + 1) as f64 / denominator)
                .collect();

            ClassStats {
                label,
                document_count: n_c,
                prior: n_c as f64 / total_documents as f64,
                conditional,
            }
        });

        debug!(
            "estimated parameters: N_0={} N_1={} over {} terms",
            document_counts[0],
            document_counts[1],
            vocabulary.len()
        );

        Ok(ClassStatistics {
            total_documents,
            classes,
        })
    }
}
