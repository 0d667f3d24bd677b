//! Char filters that pre-process raw text before it reaches the tokenizer.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole text
//! - [`punctuation::PunctuationCharFilter`] - Deletes punctuation characters
//!
//! # Examples
//!
//! ```
//! use verdict::analysis::char_filter::CharFilter;
//! use verdict::analysis::char_filter::punctuation::PunctuationCharFilter;
//!
//! let filter = PunctuationCharFilter::new();
//! assert_eq!(filter.filter("pleaded guilty, fined."), "pleaded guilty fined");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod punctuation;

pub use lowercase::LowercaseCharFilter;
pub use punctuation::PunctuationCharFilter;
