//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words
//!
//! # Examples
//!
//! ```
//! use verdict::analysis::token_filter::Filter;
//! use verdict::analysis::token_filter::stop::StopFilter;
//! use verdict::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["was"]);
//! let tokens = vec![Token::new("was", 0), Token::new("acquitted", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "acquitted");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod stop;

pub use stop::{StopFilter, StopwordLanguage};
