//! Lowercasing char filter.

use super::CharFilter;

/// A char filter that lowercases the whole input.
///
/// Uses Unicode-aware lowercasing. Placed ahead of other char filters so
/// their character sets only ever see lowercase text.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
