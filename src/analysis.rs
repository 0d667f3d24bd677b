//! Text analysis for case narratives.
//!
//! Char filters clean raw text, a tokenizer splits it, token filters
//! transform the token stream, and analyzers tie the stages together.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
