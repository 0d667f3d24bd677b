//! Pipeline analyzer that combines char filters, a tokenizer and filters.
//!
//! Processing order:
//! 1. Char filters, in the order they were added
//! 2. Tokenizer
//! 3. Token filters, in the order they were added
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use verdict::analysis::analyzer::Analyzer;
//! use verdict::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use verdict::analysis::char_filter::{LowercaseCharFilter, PunctuationCharFilter};
//! use verdict::analysis::token_filter::StopFilter;
//! use verdict::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()))
//!     .add_char_filter(Arc::new(PunctuationCharFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));
//!
//! let tokens: Vec<_> = analyzer.analyze("Fined, THE court AND released").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "fined");
//! assert_eq!(tokens[1].text, "court");
//! assert_eq!(tokens[2].text, "released");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// The configured name of this pipeline.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut filtered_text = text.to_string();
        for char_filter in &self.char_filters {
            filtered_text = char_filter.filter(&filtered_text);
        }

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        // The configured name is not 'static; see `pipeline_name`.
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::{LowercaseCharFilter, PunctuationCharFilter};
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::StopFilter;
    use crate::analysis::tokenizer::WhitespaceTokenizer;

    #[test]
    fn test_char_filters_apply_in_order() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["was", "on"])));

        let tokens: Vec<Token> = analyzer
            .analyze("Defendant WAS  acquitted On appeal")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["defendant", "acquitted", "appeal"]);
        assert_eq!(tokens[1].position, 2);
    }

    #[test]
    fn test_char_filters_run_before_stop_words() {
        // "the." only becomes a stop word once the period is gone
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PunctuationCharFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the"])));

        let tokens: Vec<Token> = analyzer.analyze("paid the. fine").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "paid");
        assert_eq!(tokens[1].text, "fine");
    }

    #[test]
    fn test_debug_lists_stages() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PunctuationCharFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the"])))
            .with_name("custom");

        let debug = format!("{analyzer:?}");
        assert!(debug.contains("punctuation"));
        assert!(debug.contains("lowercase"));
        assert!(debug.contains("stop"));
        assert_eq!(analyzer.pipeline_name(), "custom");
        assert_eq!(analyzer.char_filters().len(), 2);
        assert_eq!(analyzer.filters().len(), 1);
    }
}
