//! Normalization of tables, text and domain knowledge
//!
//! Extraction compares strings literally, so tables, text pages and the
//! domain knowledge must pass through the same normalization:
//! 1. replace known extraction artefacts (dashes, "r/min", tabs, ...) and
//!    transliterate the rest to ASCII
//! 2. tokenize into words, numbers and single punctuation characters
//! 3. join tokens with single spaces and lower-case
//!
//! Tables may additionally have their compound rows split.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::splitter::split_compound_rows;
use crate::data::expressions::TOKEN;
use crate::data::knowledge::{DomainEntry, DomainKnowledge, UnitEntry};
use crate::data::replacements::{REPLACE_ORDER, REPLACE_PATTERNS};
use crate::data::table::{Table, TableDocument, TextDocument};

/// Options for table normalization
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizeOptions {
    /// Split rows holding two delimiter-joined keys into two rows
    pub split_rows: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { split_rows: true }
    }
}

impl NormalizeOptions {
    /// Cell normalization only, rows are kept as they are
    pub fn cells_only() -> Self {
        Self { split_rows: false }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Normalize one string: replace artefacts, transliterate, tokenize,
/// lower-case.
///
/// ```rust
/// use kvu::normalize_text;
///
/// assert_eq!(normalize_text("5 µm"), "5 um");
/// assert_eq!(normalize_text("Température max."), "temperature max .");
/// ```
pub fn normalize_text(text: &str) -> String {
    let replaced = replace_artefacts(text);
    let tokens: Vec<&str> = TOKEN.find_iter(&replaced).map(|m| m.as_str()).collect();
    tokens.join(" ").to_lowercase()
}

fn replace_artefacts(text: &str) -> String {
    let mut out = text.to_string();
    for pattern in REPLACE_ORDER {
        if let Some(replacement) = REPLACE_PATTERNS.get(*pattern) {
            if out.contains(pattern) {
                out = out.replace(pattern, replacement);
            }
        }
    }
    deunicode::deunicode(&out)
}

/// Normalize every page of a text document
pub fn normalize_pages(document: &TextDocument) -> TextDocument {
    TextDocument {
        file: document.file.clone(),
        pages: document
            .pages
            .iter()
            .map(|(&page, text)| (page, normalize_text(text)))
            .collect(),
        classification: document.classification.clone(),
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Normalize every cell of `tables`, splitting compound rows when enabled.
///
/// Keywords for row splitting are taken from `knowledge`, which should
/// already be normalized.
pub fn normalize_tables(
    tables: &[Table],
    knowledge: &DomainKnowledge,
    options: &NormalizeOptions,
) -> Vec<Table> {
    let keywords = options.split_rows.then(|| knowledge.keyword_set());
    tables
        .iter()
        .map(|table| {
            let normalized = Table::new(
                table
                    .rows
                    .iter()
                    .map(|row| row.iter().map(|cell| normalize_text(cell)).collect())
                    .collect(),
            );
            match &keywords {
                Some(keywords) => split_compound_rows(&normalized, keywords),
                None => normalized,
            }
        })
        .collect()
}

/// Normalize the tables of a document
pub fn normalize_document(
    document: &TableDocument,
    knowledge: &DomainKnowledge,
    options: &NormalizeOptions,
) -> TableDocument {
    TableDocument {
        file: document.file.clone(),
        tables: normalize_tables(&document.tables, knowledge, options),
        classification: document.classification.clone(),
    }
}

// =============================================================================
// Domain knowledge
// =============================================================================

/// Normalize keys, synonyms, units and symbols.
///
/// Synonyms that become equal after normalization are merged, keeping the
/// first position.
pub fn normalize_knowledge(knowledge: &DomainKnowledge) -> DomainKnowledge {
    let mut normalized = DomainKnowledge::new();
    for entry in &knowledge.entries {
        let main_key = normalize_text(&entry.main_key);
        let synonyms = entry.synonyms.iter().map(|s| normalize_text(s));
        let entry_out = DomainEntry::with_synonyms(main_key, synonyms);
        // a missing unit entry stays missing so extraction still fails fast
        match knowledge.units.get(&entry.main_key) {
            Some(units) => normalized.push(entry_out, normalize_unit_entry(units)),
            None => normalized.entries.push(entry_out),
        }
    }
    normalized
}

fn normalize_unit_entry(entry: &UnitEntry) -> UnitEntry {
    let normalize_all = |items: &[String]| -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(items.len());
        for item in items.iter().map(|i| normalize_text(i)) {
            if !item.is_empty() && !out.contains(&item) {
                out.push(item);
            }
        }
        out
    };
    UnitEntry {
        base_unit: entry.base_unit.as_deref().map(normalize_text),
        prefixed_units: normalize_all(&entry.prefixed_units),
        base_symbol: entry.base_symbol.as_deref().map(normalize_text),
        prefixed_symbols: normalize_all(&entry.prefixed_symbols),
    }
}
