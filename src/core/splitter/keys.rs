//! Key resolution for compound key cells

use fxhash::FxHashSet;

use crate::data::expressions::{KEY_UNIT, MULTIPLE_ENTRY_DELIMITER};
use crate::utils::text::contains_words;

/// Keys resolved from one compound cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub left: String,
    pub right: String,
}

/// Whether `text` contains any known keyword as a whole-word sequence
pub fn contains_keyword(text: &str, keywords: &FxHashSet<String>) -> bool {
    keywords.iter().any(|k| contains_words(text, k))
}

/// Complete an elliptical half by prepending leading words of the other.
///
/// "number of slots" + "poles" tries "number poles", then
/// "number of poles", and returns the first known keyword.
pub fn combine_keyword(complete: &str, fragment: &str, keywords: &FxHashSet<String>) -> Option<String> {
    let head = fragment
        .split(|c: char| matches!(c, ',' | '[' | '('))
        .next()
        .unwrap_or_default()
        .trim();
    if head.is_empty() {
        return None;
    }
    let words: Vec<&str> = complete.split_whitespace().collect();
    (1..words.len())
        .map(|i| format!("{} {}", words[..i].join(" "), head))
        .find(|candidate| keywords.contains(candidate))
}

/// Replace the keyword ending `complete` with the head noun of `fragment`.
///
/// "number of slots" + "poles" with "slots" known gives "number of poles".
/// Only a single-word fragment is substituted, and only into a phrase
/// without a further delimiter that ends in a known keyword shorter than
/// the phrase itself.
pub fn substitute_keyword(complete: &str, fragment: &str, keywords: &FxHashSet<String>) -> Option<String> {
    let head = strip_unit(fragment);
    if head.split_whitespace().count() != 1 {
        return None;
    }
    let phrase = strip_unit(complete);
    if phrase.contains(MULTIPLE_ENTRY_DELIMITER) {
        return None;
    }
    let words: Vec<&str> = phrase.split_whitespace().collect();
    (1..words.len())
        .find(|&i| keywords.contains(&words[i..].join(" ")))
        .map(|i| format!("{} {}", words[..i].join(" "), head))
}

/// Key for the shorter half of a cell whose halves both hold keywords
fn complete_elliptical(complete: &str, fragment: &str, keywords: &FxHashSet<String>) -> String {
    combine_keyword(complete, fragment, keywords)
        .or_else(|| substitute_keyword(complete, fragment, keywords))
        .unwrap_or_else(|| strip_unit(fragment))
}

/// Resolve both keys of a compound cell, or `None` when one side cannot be
/// resolved.
pub fn resolve_keys(cell: &str, keywords: &FxHashSet<String>) -> Option<KeyPair> {
    let (left, right) = cell.split_once(MULTIPLE_ENTRY_DELIMITER)?;
    let (left, right) = (left.trim(), right.trim());
    let left_known = contains_keyword(left, keywords);
    let right_known = contains_keyword(right, keywords);

    let left_words = left.split_whitespace().count();
    let right_words = right.split_whitespace().count();

    let (key_left, key_right) = match (left_known, right_known) {
        (false, false) => return None,
        (true, false) => (strip_unit(left), combine_keyword(left, right, keywords)?),
        (false, true) => (combine_keyword(right, left, keywords)?, strip_unit(right)),
        (true, true) => {
            // prefer completing an elliptical half over its bare head noun
            if right_words < left_words {
                (strip_unit(left), complete_elliptical(left, right, keywords))
            } else if left_words < right_words {
                (complete_elliptical(right, left, keywords), strip_unit(right))
            } else {
                (strip_unit(left), strip_unit(right))
            }
        }
    };

    let (unit_left, unit_right) = (key_unit(left), key_unit(right));
    let unit_left = unit_left.or(unit_right);
    let unit_right = unit_right.or(unit_left);

    Some(KeyPair {
        left: with_unit(key_left, unit_left),
        right: with_unit(key_right, unit_right),
    })
}

fn key_unit(text: &str) -> Option<&str> {
    KEY_UNIT.find(text).map(|m| m.as_str())
}

fn strip_unit(text: &str) -> String {
    KEY_UNIT.replace_all(text, "").trim().to_string()
}

fn with_unit(key: String, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{} {}", key, unit),
        None => key,
    }
}
