//! Normalizer for case-outcome narratives.
//!
//! A narrative is lowercased, stripped of punctuation, stripped of stop
//! words and re-joined with single spaces. The cleaned string is what the
//! vocabulary builder and the classifier consume.
//!
//! # Examples
//!
//! ```
//! use verdict::analysis::analyzer::NarrativeAnalyzer;
//!
//! let analyzer = NarrativeAnalyzer::new();
//! let cleaned = analyzer.normalize("He pleaded GUILTY to the DUI,  and was fined.").unwrap();
//! assert_eq!(cleaned, "pleaded guilty dui fined");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::punctuation::{DEFAULT_PUNCTUATION, PunctuationCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stop::{StopFilter, StopwordLanguage};
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Analyzer that turns a raw narrative into its cleaned form.
///
/// Lowercasing and punctuation removal are char filters, in that order, so
/// an injected punctuation set is matched against lowercased text.
#[derive(Clone)]
pub struct NarrativeAnalyzer {
    inner: PipelineAnalyzer,
}

impl NarrativeAnalyzer {
    /// English stop words and ASCII punctuation.
    pub fn new() -> Self {
        Self::with_stop_filter(StopFilter::new(), PunctuationCharFilter::new())
    }

    /// Build a normalizer from an injected stop word set and punctuation set.
    pub fn with_lists(stop_words: HashSet<String>, punctuation: &str) -> Result<Self> {
        Ok(Self::with_stop_filter(
            StopFilter::with_stop_words(stop_words),
            PunctuationCharFilter::with_characters(punctuation)?,
        ))
    }

    /// Build a normalizer for a built-in stop word list and the default punctuation.
    pub fn for_language(language: StopwordLanguage) -> Self {
        Self::with_stop_filter(
            StopFilter::for_language(language),
            PunctuationCharFilter::new(),
        )
    }

    fn with_stop_filter(stop_filter: StopFilter, punctuation: PunctuationCharFilter) -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(punctuation))
            .add_filter(Arc::new(stop_filter))
            .with_name("narrative");

        Self { inner }
    }

    /// Normalize one narrative. Empty input yields an empty document.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let terms: Vec<String> = self.inner.analyze(raw)?.map(|token| token.text).collect();
        Ok(terms.join(" "))
    }

    /// Normalize a narrative that may be missing; `None` is an empty document.
    pub fn normalize_optional(&self, raw: Option<&str>) -> Result<String> {
        match raw {
            Some(text) => self.normalize(text),
            None => Ok(String::new()),
        }
    }

    /// Wrap a sequence of raw narratives in a lazy, restartable cleaned view.
    pub fn clean_documents<'a, I>(&'a self, raw: I) -> CleanedDocuments<'a>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        CleanedDocuments {
            analyzer: self,
            raw: raw.into_iter().collect(),
        }
    }

    /// Default punctuation set used by [`NarrativeAnalyzer::new`].
    pub fn default_punctuation() -> &'static str {
        DEFAULT_PUNCTUATION
    }
}

impl Default for NarrativeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for NarrativeAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "narrative"
    }
}

impl std::fmt::Debug for NarrativeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Cleaned view over a borrowed sequence of raw narratives.
///
/// Nothing is normalized until the view is iterated, and every call to
/// [`iter`](CleanedDocuments::iter) starts again from the first document.
pub struct CleanedDocuments<'a> {
    analyzer: &'a NarrativeAnalyzer,
    raw: Vec<Option<&'a str>>,
}

impl<'a> CleanedDocuments<'a> {
    /// Iterate the cleaned documents in input order.
    pub fn iter(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.raw
            .iter()
            .map(move |raw| self.analyzer.normalize_optional(*raw))
    }

    /// Normalize every document, in parallel, preserving input order.
    pub fn collect_all(&self) -> Result<Vec<String>> {
        self.raw
            .par_iter()
            .map(|raw| self.analyzer.normalize_optional(*raw))
            .collect()
    }

    /// Number of documents in the view.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the view has no documents.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
