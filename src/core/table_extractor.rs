//! Key-value-unit extraction from tables
//!
//! For every key of the domain knowledge and every row, the first cell
//! matching a synonym becomes the anchor. Search patterns around the
//! anchor are tried in order until the value/unit parser accepts one; the
//! row then yields one tuple for that key. When no pattern validates, the
//! next matching cell of the row is tried.

use crate::core::matcher::CellMatcher;
use crate::core::options::ExtractionOptions;
use crate::core::patterns::{candidate_string, SearchPatterns};
use crate::core::value_unit::{parse_value_unit, UnitCatalog, UnitsAndSymbols, ValueUnit};
use crate::data::knowledge::{DomainEntry, DomainKnowledge};
use crate::data::table::{Context, KvuTuple, Table, TableDocument};
use crate::utils::error::{KvuError, KvuResult};

/// Extract tuples from the tables of every document.
///
/// Fails before any work when a key of `knowledge` has no unit entry; a
/// table without matches simply yields nothing.
pub fn extract_table_kvu(
    documents: &[TableDocument],
    knowledge: &DomainKnowledge,
    options: &ExtractionOptions,
) -> KvuResult<Vec<KvuTuple>> {
    options.warn_if_loose();
    knowledge.validate()?;
    let extractor = TableExtractor::new(knowledge, options)?;

    let mut tuples = Vec::new();
    for document in documents {
        for (index, table) in document.tables.iter().enumerate() {
            let before = tuples.len();
            extractor.extract_table(document, index, table, &mut tuples)?;
            tracing::debug!(
                file = %document.file,
                table = index,
                tuples = tuples.len() - before,
                "extracted table"
            );
        }
    }

    tracing::info!(
        documents = documents.len(),
        tuples = tuples.len(),
        "table extraction finished"
    );
    Ok(tuples)
}

/// Extract tuples from one table of a document
pub fn extract_single_table(
    document: &TableDocument,
    index: usize,
    knowledge: &DomainKnowledge,
    options: &ExtractionOptions,
) -> KvuResult<Vec<KvuTuple>> {
    options.warn_if_loose();
    knowledge.validate()?;
    let table = document
        .tables
        .get(index)
        .ok_or_else(|| KvuError::out_of_range("table", index, document.tables.len()))?;
    let extractor = TableExtractor::new(knowledge, options)?;
    let mut tuples = Vec::new();
    extractor.extract_table(document, index, table, &mut tuples)?;
    Ok(tuples)
}

struct TableExtractor<'k> {
    knowledge: &'k DomainKnowledge,
    options: &'k ExtractionOptions,
    matcher: CellMatcher,
    catalog: UnitCatalog,
}

impl<'k> TableExtractor<'k> {
    fn new(knowledge: &'k DomainKnowledge, options: &'k ExtractionOptions) -> KvuResult<Self> {
        Ok(Self {
            knowledge,
            options,
            matcher: CellMatcher::new(options.edit_distance, options.use_synonyms),
            catalog: UnitCatalog::new(knowledge)?,
        })
    }

    fn extract_table(
        &self,
        document: &TableDocument,
        index: usize,
        table: &Table,
        out: &mut Vec<KvuTuple>,
    ) -> KvuResult<()> {
        for entry in &self.knowledge.entries {
            let units = UnitsAndSymbols::for_key(&entry.main_key, self.knowledge, &self.catalog)?;
            for (j, row) in table.rows.iter().enumerate() {
                if let Some((synonym, found)) = self.search_row(table, j, entry, &units) {
                    out.push(KvuTuple {
                        file: document.file.clone(),
                        main_key: entry.main_key.clone(),
                        matched_synonym: synonym.to_string(),
                        value: found.value,
                        unit: found.unit,
                        context: Context::Row(row.clone()),
                        index,
                        classification: document.classification.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// First validated solution of `entry` in row `j`
    fn search_row<'e>(
        &self,
        table: &Table,
        j: usize,
        entry: &'e DomainEntry,
        units: &UnitsAndSymbols<'_>,
    ) -> Option<(&'e str, ValueUnit)> {
        let row = table.row(j)?;
        row.iter().enumerate().find_map(|(k, cell)| {
            let synonym = self.matcher.find_synonym(cell, entry)?;
            SearchPatterns::for_table(table, j, k, self.options.do_pivot_search)
                .map(|pattern| {
                    let candidate = candidate_string(table, j, k, &pattern);
                    parse_value_unit(&candidate, units, self.options.unit_check)
                })
                .find(|found| found.is_valid)
                .map(|found| (synonym, found))
        })
    }
}
