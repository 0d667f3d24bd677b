//! Punctuation removal char filter.
//!
//! Punctuation is deleted, not replaced by whitespace, so fragments on either
//! side of a mark are joined: `"guilty,plea"` becomes `"guiltyplea"` while
//! `"guilty, plea"` keeps two words.

use regex::Regex;

use super::CharFilter;
use crate::error::{Result, VerdictError};

/// The ASCII punctuation characters removed by default.
pub const DEFAULT_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A char filter that deletes every character of a configurable set.
#[derive(Clone, Debug)]
pub struct PunctuationCharFilter {
    /// `None` when the set is empty and the filter is a no-op.
    pattern: Option<Regex>,
    characters: String,
}

impl PunctuationCharFilter {
    /// Create a filter removing [`DEFAULT_PUNCTUATION`].
    pub fn new() -> Self {
        Self::with_characters(DEFAULT_PUNCTUATION)
            .expect("default punctuation set compiles to a valid character class")
    }

    /// Create a filter removing each character of `characters`.
    pub fn with_characters(characters: &str) -> Result<Self> {
        let mut unique: Vec<char> = characters.chars().collect();
        unique.sort_unstable();
        unique.dedup();

        let pattern = if unique.is_empty() {
            None
        } else {
            let class: String = unique
                .iter()
                .map(|c| regex::escape(&c.to_string()))
                .collect();
            let regex = Regex::new(&format!("[{class}]")).map_err(|e| {
                VerdictError::analysis(format!("invalid punctuation set {characters:?}: {e}"))
            })?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            characters: unique.into_iter().collect(),
        })
    }

    /// The characters this filter removes, sorted and deduplicated.
    pub fn characters(&self) -> &str {
        &self.characters
    }
}

impl Default for PunctuationCharFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(input, "").into_owned(),
            None => input.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_without_inserting_space() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("guilty,plea"), "guiltyplea");
        assert_eq!(filter.filter("guilty, plea"), "guilty plea");
        assert_eq!(filter.filter("didn't"), "didnt");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let filter = PunctuationCharFilter::with_characters("-[]^\\").unwrap();
        assert_eq!(filter.filter("a-b[c]d^e\\f.g"), "abcdef.g");
    }

    #[test]
    fn test_empty_set_is_noop() {
        let filter = PunctuationCharFilter::with_characters("").unwrap();
        assert_eq!(filter.filter("a.b, c!"), "a.b, c!");
        assert!(filter.characters().is_empty());
    }

    #[test]
    fn test_default_set_covers_ascii_punctuation() {
        let filter = PunctuationCharFilter::new();
        let all: String = (0u8..128)
            .map(char::from)
            .filter(|c| c.is_ascii_punctuation())
            .collect();
        assert_eq!(filter.filter(&all), "");
        assert_eq!(filter.name(), "punctuation");
    }
}
