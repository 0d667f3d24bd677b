//! Analyzers combine a char filter chain, a tokenizer and token filters.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filter 1 … N → Token Stream
//! ```
//!
//! - [`PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`NarrativeAnalyzer`] - The case-narrative normalizer used for training
//!   and classification

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod narrative;
pub mod pipeline;

pub use narrative::{CleanedDocuments, NarrativeAnalyzer};
pub use pipeline::PipelineAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can normalize
/// documents from several worker threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
