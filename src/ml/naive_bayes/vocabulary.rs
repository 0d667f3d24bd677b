//! Vocabulary building and document-term presence.
//!
//! The Bernoulli model records whether a term occurs in a document, never how
//! often. A term repeated three times in one narrative contributes a single
//! presence bit and a single unit of document frequency.

use ahash::{AHashMap, AHashSet};
use bit_vec::BitVec;
use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{Result, VerdictError};

/// Pruned set of terms, stored in lexicographic order.
///
/// Term order fixes the column order of presence rows and probability
/// tables, which keeps floating-point products reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: AHashMap<String, usize>,
    document_frequency: Vec<usize>,
    min_doc_freq: usize,
    documents: usize,
}

impl Vocabulary {
    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether pruning left no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `term` survived pruning.
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Column of `term` in presence rows and probability tables.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Document frequency of a surviving term.
    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.index_of(term).map(|i| self.document_frequency[i])
    }

    /// `(term, document frequency)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.document_frequency.iter().copied())
    }

    /// Threshold this vocabulary was pruned with.
    pub fn min_doc_freq(&self) -> usize {
        self.min_doc_freq
    }

    /// Number of documents the vocabulary was built from.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Presence row of a cleaned document over this vocabulary.
    pub fn presence(&self, cleaned: &str) -> BitVec {
        let mut row = BitVec::from_elem(self.terms.len(), false);
        for term in cleaned.split_whitespace() {
            if let Some(i) = self.index_of(term) {
                row.set(i, true);
            }
        }
        row
    }
}

/// Document × term presence matrix. Rows follow input document order.
#[derive(Debug, Clone, Default)]
pub struct PresenceMatrix {
    rows: Vec<BitVec>,
    width: usize,
}

impl PresenceMatrix {
    /// Number of documents (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of terms (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Presence row of document `doc`.
    pub fn row(&self, doc: usize) -> Option<&BitVec> {
        self.rows.get(doc)
    }

    /// All rows in document order.
    pub fn rows(&self) -> &[BitVec] {
        &self.rows
    }

    /// Whether term column `term` is set for document `doc`.
    pub fn is_present(&self, doc: usize, term: usize) -> bool {
        self.rows
            .get(doc)
            .and_then(|row| row.get(term))
            .unwrap_or(false)
    }

    /// Number of set entries in a row.
    pub fn row_count(&self, doc: usize) -> usize {
        self.rows
            .get(doc)
            .map(|row| row.iter().filter(|bit| *bit).count())
            .unwrap_or(0)
    }
}

/// Builds a pruned vocabulary and its presence matrix from cleaned documents.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyBuilder {
    min_doc_freq: usize,
}

impl VocabularyBuilder {
    /// Default document-frequency threshold.
    pub const DEFAULT_MIN_DOC_FREQ: usize = 5;

    /// Create a builder keeping terms found in at least `min_doc_freq` documents.
    pub fn new(min_doc_freq: usize) -> Result<Self> {
        if min_doc_freq == 0 {
            return Err(VerdictError::invalid_config(
                "min_doc_freq must be at least 1",
            ));
        }
        Ok(Self { min_doc_freq })
    }

    /// The pruning threshold.
    pub fn min_doc_freq(&self) -> usize {
        self.min_doc_freq
    }

    /// Build the training-side vocabulary.
    ///
    /// Fails with [`VerdictError::EmptyVocabulary`] when no term reaches the
    /// threshold, since a model over no terms would score priors only.
    pub fn build<S>(&self, documents: &[S]) -> Result<(Vocabulary, PresenceMatrix)>
    where
        S: AsRef<str> + Sync,
    {
        let (vocabulary, matrix) = self.build_unchecked(documents);
        if vocabulary.is_empty() {
            return Err(VerdictError::EmptyVocabulary {
                min_doc_freq: self.min_doc_freq,
                documents: documents.len(),
            });
        }
        Ok((vocabulary, matrix))
    }

    /// Build the test-side vocabulary used only to detect term presence.
    ///
    /// An empty result is tolerated: a small batch may have no term reaching
    /// the threshold, in which case no training term counts as present.
    pub fn build_filter<S>(&self, documents: &[S]) -> Vocabulary
    where
        S: AsRef<str> + Sync,
    {
        let (vocabulary, _) = self.build_unchecked(documents);
        if vocabulary.is_empty() && !documents.is_empty() {
            warn!(
                "test-side vocabulary is empty (min_doc_freq {} over {} documents); every term scores as absent",
                self.min_doc_freq,
                documents.len()
            );
        }
        vocabulary
    }

    fn build_unchecked<S>(&self, documents: &[S]) -> (Vocabulary, PresenceMatrix)
    where
        S: AsRef<str> + Sync,
    {
        let unique_terms: Vec<AHashSet<&str>> = documents
            .par_iter()
            .map(|doc| doc.as_ref().split_whitespace().collect())
            .collect();

        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();
        for terms in &unique_terms {
            for term in terms {
                *document_frequency.entry(*term).or_insert(0) += 1;
            }
        }

        let candidates = document_frequency.len();
        let mut kept: Vec<(&str, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.min_doc_freq)
            .collect();
        kept.sort_unstable_by(|a, b| a.0.cmp(b.0));

        debug!(
            "vocabulary: kept {} of {} terms at min_doc_freq {}",
            kept.len(),
            candidates,
            self.min_doc_freq
        );

        let terms: Vec<String> = kept.iter().map(|(term, _)| term.to_string()).collect();
        let index: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        let frequencies = kept.iter().map(|(_, df)| *df).collect();

        let width = terms.len();
        let rows = unique_terms
            .par_iter()
            .map(|doc_terms| {
                let mut row = BitVec::from_elem(width, false);
                for term in doc_terms {
                    if let Some(&i) = index.get(*term) {
                        row.set(i, true);
                    }
                }
                row
            })
            .collect();

        let vocabulary = Vocabulary {
            terms,
            index,
            document_frequency: frequencies,
            min_doc_freq: self.min_doc_freq,
            documents: documents.len(),
        };

        (vocabulary, PresenceMatrix { rows, width })
    }
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self {
            min_doc_freq: Self::DEFAULT_MIN_DOC_FREQ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "assault charge dismissed".to_string(),
            "assault assault assault".to_string(),
            "dui plea guilty".to_string(),
            "assault plea guilty".to_string(),
            "charge dismissed".to_string(),
        ]
    }

    #[test]
    fn test_presence_not_count() {
        let builder = VocabularyBuilder::new(1).unwrap();
        let (vocabulary, matrix) = builder.build(&corpus()).unwrap();

        let assault = vocabulary.index_of("assault").unwrap();
        assert!(matrix.is_present(1, assault));
        assert_eq!(matrix.row_count(1), 1);
        assert_eq!(vocabulary.document_frequency("assault"), Some(3));
    }

    #[test]
    fn test_pruning_threshold() {
        let builder = VocabularyBuilder::new(2).unwrap();
        let (vocabulary, matrix) = builder.build(&corpus()).unwrap();

        let terms: Vec<&str> = vocabulary.terms().iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["assault", "charge", "dismissed", "guilty", "plea"]);
        assert!(!vocabulary.contains("dui"));
        assert_eq!(matrix.len(), 5);
        assert_eq!(matrix.width(), 5);
        // "dui" was pruned from the row too
        assert_eq!(matrix.row_count(2), 2);
    }

    #[test]
    fn test_rows_align_with_input_order() {
        let builder = VocabularyBuilder::new(1).unwrap();
        let docs = corpus();
        let (vocabulary, matrix) = builder.build(&docs).unwrap();

        for (doc, text) in docs.iter().enumerate() {
            assert_eq!(matrix.row(doc), Some(&vocabulary.presence(text)));
        }
    }

    #[test]
    fn test_pruning_is_monotonic() {
        let docs = corpus();
        let mut previous = usize::MAX;
        for min_doc_freq in 1..=6 {
            let builder = VocabularyBuilder::new(min_doc_freq).unwrap();
            let size = builder.build_filter(&docs).len();
            assert!(size <= previous);
            previous = size;
        }
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let builder = VocabularyBuilder::new(6).unwrap();
        match builder.build(&corpus()) {
            Err(VerdictError::EmptyVocabulary {
                min_doc_freq,
                documents,
            }) => {
                assert_eq!(min_doc_freq, 6);
                assert_eq!(documents, 5);
            }
            other => panic!("expected EmptyVocabulary, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_tolerates_empty() {
        let builder = VocabularyBuilder::new(6).unwrap();
        let filter = builder.build_filter(&corpus());
        assert!(filter.is_empty());
        assert_eq!(filter.documents(), 5);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(VocabularyBuilder::new(0).is_err());
        assert_eq!(VocabularyBuilder::default().min_doc_freq(), 5);
    }

    #[test]
    fn test_empty_documents_contribute_nothing() {
        let builder = VocabularyBuilder::new(1).unwrap();
        let docs = vec![String::new(), "guilty".to_string()];
        let (vocabulary, matrix) = builder.build(&docs).unwrap();
        assert_eq!(vocabulary.len(), 1);
        assert_eq!(matrix.row_count(0), 0);
    }
}
