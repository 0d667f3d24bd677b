//! Run configuration for the classification pipeline.
//!
//! ```
//! use verdict::pipeline::config::NaiveBayesConfig;
//!
//! let config: NaiveBayesConfig = serde_json::from_str(r#"{"min_doc_freq": 2}"#).unwrap();
//! assert_eq!(config.min_doc_freq, 2);
//! assert_eq!(config.train_fraction, 0.6);
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::NarrativeAnalyzer;
use crate::analysis::token_filter::StopwordLanguage;
use crate::error::{Result, VerdictError};
use crate::ml::naive_bayes::{ScoringMode, VocabularyBuilder};

/// Configuration for training, splitting and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesConfig {
    /// Minimum number of documents a term must appear in to be kept.
    #[serde(default = "default_min_doc_freq")]
    pub min_doc_freq: usize,

    /// Fraction of labeled records used for training in evaluation mode.
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,

    /// Seed of the evaluation shuffle.
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Built-in stop word list.
    #[serde(default)]
    pub stopword_language: StopwordLanguage,

    /// Replaces the built-in stop word list when set.
    #[serde(default)]
    pub custom_stopwords: Option<Vec<String>>,

    /// Characters removed before tokenization; ASCII punctuation when unset.
    #[serde(default)]
    pub punctuation: Option<String>,

    /// Direct product or log-space sums.
    #[serde(default)]
    pub scoring_mode: ScoringMode,
}

fn default_min_doc_freq() -> usize {
    VocabularyBuilder::DEFAULT_MIN_DOC_FREQ
}
fn default_train_fraction() -> f64 {
    0.6
}
fn default_random_seed() -> u64 {
    42
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            min_doc_freq: default_min_doc_freq(),
            train_fraction: default_train_fraction(),
            random_seed: default_random_seed(),
            stopword_language: StopwordLanguage::default(),
            custom_stopwords: None,
            punctuation: None,
            scoring_mode: ScoringMode::default(),
        }
    }
}

impl NaiveBayesConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: NaiveBayesConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_doc_freq == 0 {
            return Err(VerdictError::invalid_config(
                "min_doc_freq must be at least 1",
            ));
        }
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(VerdictError::invalid_config(format!(
                "train_fraction must be strictly between 0 and 1, got {}",
                self.train_fraction
            )));
        }
        Ok(())
    }

    /// Narrative analyzer for the configured stop words and punctuation.
    pub fn build_analyzer(&self) -> Result<NarrativeAnalyzer> {
        if self.custom_stopwords.is_none() && self.punctuation.is_none() {
            return Ok(NarrativeAnalyzer::for_language(self.stopword_language));
        }

        let stop_words: HashSet<String> = match &self.custom_stopwords {
            Some(words) => words.iter().map(|w| w.to_lowercase()).collect(),
            None => self.stopword_language.stop_words(),
        };
        let punctuation = self
            .punctuation
            .as_deref()
            .unwrap_or(NarrativeAnalyzer::default_punctuation());

        NarrativeAnalyzer::with_lists(stop_words, punctuation)
    }

    /// Vocabulary builder at the configured threshold.
    pub fn vocabulary_builder(&self) -> Result<VocabularyBuilder> {
        VocabularyBuilder::new(self.min_doc_freq)
    }
}
