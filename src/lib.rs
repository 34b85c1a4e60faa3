//! # kvu
//!
//! Key-value-unit extraction from semi-structured datasheet tables and text.
//!
//! ## Features
//!
//! - **Domain-guided**: keys, synonyms and units come from a domain knowledge
//!   catalogue
//! - **Spatial search**: values are searched in the anchor cell, adjacent
//!   cells, the rest of the row and, optionally, columns and pivot headers
//! - **Fuzzy matching**: synonyms match cells within a Levenshtein threshold
//! - **Unit validation**: a unit belonging to another key rejects the value
//! - **Row splitting**: compound rows ("slots / poles | 36/6") become two rows
//! - **Text extraction**: sentence windows around synonyms in running text
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Table Extraction
//!
//! ```rust
//! use kvu::{extract_table_kvu, DomainEntry, DomainKnowledge, ExtractionOptions};
//! use kvu::{Table, TableDocument, UnitEntry};
//!
//! let knowledge = DomainKnowledge::new().with(
//!     DomainEntry::new("voltage"),
//!     UnitEntry::from_lists(["volt"], "V", Vec::<&str>::new()),
//! );
//! let table = Table::from_rows(vec![vec!["voltage", "230/400", "V"]]);
//! let documents = vec![TableDocument::new("motor.pdf", vec![table])];
//!
//! let tuples = extract_table_kvu(&documents, &knowledge, &ExtractionOptions::default()).unwrap();
//! assert_eq!(tuples[0].value, "230/400");
//! assert_eq!(tuples[0].unit, "V");
//! ```
//!
//! ### Row Splitting
//!
//! ```rust
//! use kvu::{split_compound_rows, Table};
//!
//! let keywords = ["number of slots", "number of poles"]
//!     .iter()
//!     .map(|k| k.to_string())
//!     .collect();
//! let table = Table::from_rows(vec![vec!["number of slots / poles", "36/6"]]);
//! let split = split_compound_rows(&table, &keywords);
//! assert_eq!(split.rows[1], vec!["number of poles", "6"]);
//! ```

/// Core extraction modules
pub mod core;

/// Data layer - domain model, tables and static expressions
pub mod data;

/// Feature modules - normalization, conversion, loading
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core extraction functions
pub use crate::core::{
    extract_single_table, extract_table_kvu, extract_text_kvu, merge, parse_value_unit,
    split_compound_rows, CellMatcher, ExtractionOptions, SearchPatterns, ValueUnit,
};

// Re-export data types
pub use data::{
    Context, DomainEntry, DomainKnowledge, KvuTuple, RawKnowledgeEntry, Table, TableDocument,
    TextDocument, UnitEntry,
};

// Re-export feature functions
pub use features::{
    convert_units, normalize_knowledge, normalize_tables, normalize_text, run_pipeline, KvuConfig,
    NormalizeOptions,
};

// Re-export utilities
pub use utils::error::{KvuError, KvuResult};

/// Extract from tables and text pages and merge the results
///
/// Inputs are expected to be normalized already; see [`run_pipeline`] for
/// the full run including normalization and unit conversion.
pub fn extract_all(
    tables: &[TableDocument],
    texts: &[TextDocument],
    knowledge: &DomainKnowledge,
    options: &ExtractionOptions,
    max_len_text: usize,
) -> KvuResult<Vec<KvuTuple>> {
    let table_tuples = extract_table_kvu(tables, knowledge, options)?;
    let text_tuples = extract_text_kvu(texts, knowledge, options, max_len_text)?;
    Ok(merge(table_tuples, text_tuples))
}
