//! Fuzzy synonym matching against table cells
//!
//! A synonym of *n* words is compared with every contiguous *n*-word window
//! of the cell. The cell matches when one window is within the configured
//! Levenshtein distance of the synonym.

use crate::data::knowledge::DomainEntry;

/// Matches cells against the synonyms of a key
#[derive(Debug, Clone, Copy)]
pub struct CellMatcher {
    /// Accepted edit distance; 0 means exact window match
    pub max_distance: usize,
    /// Search all synonyms instead of only the main key
    pub use_synonyms: bool,
}

impl Default for CellMatcher {
    fn default() -> Self {
        Self {
            max_distance: 1,
            use_synonyms: true,
        }
    }
}

impl CellMatcher {
    pub fn new(max_distance: usize, use_synonyms: bool) -> Self {
        Self {
            max_distance,
            use_synonyms,
        }
    }

    /// First synonym of `entry` found in `cell`, in synonym order
    pub fn find_synonym<'e>(&self, cell: &str, entry: &'e DomainEntry) -> Option<&'e str> {
        entry
            .search_terms(self.use_synonyms)
            .iter()
            .find(|synonym| self.matches(cell, synonym))
            .map(String::as_str)
    }

    /// Whether any n-gram window of `cell` is close enough to `synonym`
    pub fn matches(&self, cell: &str, synonym: &str) -> bool {
        let n = synonym.split(' ').count();
        let words: Vec<&str> = cell.split(' ').collect();
        if words.len() < n {
            return false;
        }
        words.windows(n).any(|window| {
            let gram = window.join(" ");
            edit_distance(&gram, synonym) <= self.max_distance
        })
    }
}

/// Levenshtein edit distance between two strings, counted in chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
