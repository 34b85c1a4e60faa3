//! Extraction options

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default Levenshtein threshold for synonym matching
pub const DEFAULT_EDIT_DISTANCE: usize = 1;

/// Levenshtein threshold above which synonym matching is reported as loose
pub const LOOSE_EDIT_DISTANCE: usize = 3;

/// Options for the table and text extractors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractionOptions {
    /// Also search columns and pivot headers around a matched key
    pub do_pivot_search: bool,
    /// Accept only units allowed for the key
    pub unit_check: bool,
    /// Search all synonyms, not just the main key
    pub use_synonyms: bool,
    /// Levenshtein threshold for synonym matching; 0 means exact
    pub edit_distance: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            do_pivot_search: false,
            unit_check: true,
            use_synonyms: true,
            edit_distance: DEFAULT_EDIT_DISTANCE,
        }
    }
}

impl ExtractionOptions {
    /// Exact synonym matching, everything else default
    pub fn strict() -> Self {
        Self {
            edit_distance: 0,
            ..Default::default()
        }
    }

    /// Default options with pivot search enabled
    pub fn pivot() -> Self {
        Self {
            do_pivot_search: true,
            ..Default::default()
        }
    }

    pub fn with_pivot_search(mut self, enabled: bool) -> Self {
        self.do_pivot_search = enabled;
        self
    }

    pub fn with_unit_check(mut self, enabled: bool) -> Self {
        self.unit_check = enabled;
        self
    }

    pub fn with_synonyms(mut self, enabled: bool) -> Self {
        self.use_synonyms = enabled;
        self
    }

    pub fn with_edit_distance(mut self, distance: usize) -> Self {
        self.edit_distance = distance;
        self
    }

    /// Whether the threshold is large enough to match unrelated words
    pub fn is_loose(&self) -> bool {
        self.edit_distance > LOOSE_EDIT_DISTANCE
    }

    /// Log a warning for a loose threshold; any threshold is accepted
    pub fn warn_if_loose(&self) {
        if self.is_loose() {
            tracing::warn!(
                edit_distance = self.edit_distance,
                loose_above = LOOSE_EDIT_DISTANCE,
                "synonym matching with a large edit distance"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ExtractionOptions::default();
        assert!(!opts.do_pivot_search);
        assert!(opts.unit_check);
        assert!(opts.use_synonyms);
        assert_eq!(opts.edit_distance, 1);
    }

    #[test]
    fn test_presets() {
        assert_eq!(ExtractionOptions::strict().edit_distance, 0);
        assert!(ExtractionOptions::pivot().do_pivot_search);
    }

    #[test]
    fn test_large_distance_is_loose() {
        assert!(!ExtractionOptions::default().is_loose());
        assert!(!ExtractionOptions::default().with_edit_distance(3).is_loose());
        let opts = ExtractionOptions::default().with_edit_distance(7);
        assert!(opts.is_loose());
        opts.warn_if_loose();
    }
}
