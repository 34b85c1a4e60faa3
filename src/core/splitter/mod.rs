//! Compound row splitting
//!
//! Datasheets often pack two entries into one row, European style:
//!
//! ```text
//! | number of slots / poles | 36/6 |
//! ```
//!
//! The splitter turns such a row into two independent rows:
//!
//! ```text
//! | number of slots | 36 |
//! | number of poles | 6  |
//! ```
//!
//! # Architecture
//!
//! ```text
//! compound cell -> key resolution (keys) -> value resolution (values) -> two rows
//! ```
//!
//! A row whose keys or values cannot be resolved is kept unchanged. Passes
//! repeat until the table no longer changes, so a row holding more than one
//! compound cell is split once per pass.

mod keys;
mod values;


use fxhash::FxHashSet;

use crate::data::expressions::POSSIBLE_MULTIPLE_ENTITIES;
use crate::data::table::Table;

pub use keys::{combine_keyword, contains_keyword, resolve_keys, substitute_keyword, KeyPair};
pub use values::{find_values, ValuePair};

/// Upper bound on splitting passes over one table
pub const MAX_SPLIT_PASSES: usize = 16;

/// Split every compound row of `table` until no row changes
pub fn split_compound_rows(table: &Table, keywords: &FxHashSet<String>) -> Table {
    let mut current = table.clone();
    for pass in 0..MAX_SPLIT_PASSES {
        let (next, splits) = split_pass(&current, keywords);
        if splits == 0 {
            return next;
        }
        tracing::debug!(pass, splits, "split compound rows");
        current = next;
    }
    tracing::warn!(
        passes = MAX_SPLIT_PASSES,
        "compound row splitting did not settle"
    );
    current
}

/// Run one pass over the table, returning the new table and the number of
/// rows that were split
pub fn split_pass(table: &Table, keywords: &FxHashSet<String>) -> (Table, usize) {
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut splits = 0;
    for row in &table.rows {
        match split_row(row, keywords) {
            Some((top, bottom)) => {
                rows.push(top);
                rows.push(bottom);
                splits += 1;
            }
            None => rows.push(row.clone()),
        }
    }
    (Table::new(rows), splits)
}

/// Split one row at its first compound cell, if both keys and values resolve
pub fn split_row(row: &[String], keywords: &FxHashSet<String>) -> Option<(Vec<String>, Vec<String>)> {
    let key_column = row
        .iter()
        .position(|cell| POSSIBLE_MULTIPLE_ENTITIES.is_match(cell))?;
    let keys = resolve_keys(&row[key_column], keywords)?;
    if keys.left.is_empty() || keys.right.is_empty() {
        return None;
    }
    let values = find_values(row, key_column)?;

    let mut top = row.to_vec();
    let mut bottom = row.to_vec();
    top[key_column] = keys.left;
    bottom[key_column] = keys.right;
    top[values.column] = values.left;
    bottom[values.column] = values.right;
    Some((top, bottom))
}
