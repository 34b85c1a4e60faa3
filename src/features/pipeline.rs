//! End-to-end extraction run
//!
//! ```text
//! knowledge ──normalize──┐
//! tables ────normalize──►├─► table engine ─┐
//! text pages ─normalize─►└─► text engine ──┴─► merge ─► convert units
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::merge::merge;
use crate::core::options::ExtractionOptions;
use crate::core::table_extractor::extract_table_kvu;
use crate::core::text_extractor::{extract_text_kvu, DEFAULT_MAX_LEN_TEXT};
use crate::data::knowledge::DomainKnowledge;
use crate::data::table::{KvuTuple, TableDocument, TextDocument};
use crate::features::convert::convert_units;
use crate::features::normalize::{
    normalize_document, normalize_knowledge, normalize_pages, NormalizeOptions,
};
use crate::utils::error::KvuResult;

/// Configuration of a full extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KvuConfig {
    pub options: ExtractionOptions,
    pub normalize: NormalizeOptions,
    /// Half-width of the text window around a synonym
    pub max_len_text: usize,
    /// Convert values to the base symbol of their key
    pub convert_units: bool,
}

impl Default for KvuConfig {
    fn default() -> Self {
        Self {
            options: ExtractionOptions::default(),
            normalize: NormalizeOptions::default(),
            max_len_text: DEFAULT_MAX_LEN_TEXT,
            convert_units: true,
        }
    }
}

/// Normalize all inputs, run both engines, merge and convert
pub fn run_pipeline(
    tables: &[TableDocument],
    texts: &[TextDocument],
    knowledge: &DomainKnowledge,
    config: &KvuConfig,
) -> KvuResult<Vec<KvuTuple>> {
    let knowledge = normalize_knowledge(knowledge);
    knowledge.validate()?;

    let tables: Vec<TableDocument> = tables
        .iter()
        .map(|doc| normalize_document(doc, &knowledge, &config.normalize))
        .collect();
    let texts: Vec<TextDocument> = texts.iter().map(normalize_pages).collect();

    let table_tuples = extract_table_kvu(&tables, &knowledge, &config.options)?;
    let text_tuples = extract_text_kvu(&texts, &knowledge, &config.options, config.max_len_text)?;
    let merged = merge(table_tuples, text_tuples);

    if config.convert_units {
        Ok(convert_units(merged, &knowledge))
    } else {
        Ok(merged)
    }
}
