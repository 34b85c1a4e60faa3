//! Core extraction modules
//!
//! This module contains the extraction engine:
//! - `splitter`: splits compound rows ("slots / poles | 36/6") into simple rows
//! - `matcher`: fuzzy synonym matching against cells
//! - `patterns`: spatial search patterns around an anchor cell
//! - `value_unit`: value and unit parsing of candidate strings
//! - `table_extractor` / `text_extractor`: the two extraction engines
//! - `merge`: deduplication of table and text results

pub mod matcher;
pub mod merge;
pub mod options;
pub mod patterns;
pub mod splitter;
pub mod table_extractor;
pub mod text_extractor;
pub mod value_unit;

pub use matcher::{edit_distance, CellMatcher};
pub use merge::merge;
pub use options::{ExtractionOptions, DEFAULT_EDIT_DISTANCE, LOOSE_EDIT_DISTANCE};
pub use patterns::{
    candidate_string, SearchPattern, SearchPatterns, MIN_EXHAUSTIVE_SPAN, MIN_PIVOT_ROW_WIDTH,
};
pub use splitter::{split_compound_rows, split_row, MAX_SPLIT_PASSES};
pub use table_extractor::{extract_single_table, extract_table_kvu};
pub use text_extractor::{extract_text_kvu, DEFAULT_MAX_LEN_TEXT};
pub use value_unit::{
    closest_completest_unit, is_value_unit_sane, parse_value_unit, UnitCatalog, UnitMatch,
    UnitsAndSymbols, ValueUnit,
};
