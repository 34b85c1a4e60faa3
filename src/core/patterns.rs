//! Spatial search patterns around an anchor cell
//!
//! When a key is found in cell `(j, k)`, its value and unit usually sit
//! close by. The generator proposes, from most to least specific, which
//! cells to concatenate and hand to the value/unit parser:
//!
//! ```text
//! self        adjacent pair     exhaustive row    exhaustive column   pivot entry
//! |o_|__|__|  |o_|x_|x_|__|     |o_|x_|x_|x_|     |o_|__|              |__|__|x_|
//!             |o_|__|x_|x_|                       |x_|__|              |__|__|__|
//!                                                 |x_|__|              |o_|__|x_|
//! ```
//!
//! Offsets are relative to the anchor and clamp to the table boundary, so a
//! pattern near an edge degrades to fewer cells instead of failing.

use std::iter::FusedIterator;

use crate::data::table::Table;

/// Relative `(row, column)` offsets of the cells to concatenate
pub type SearchPattern = Vec<(isize, isize)>;

/// Smallest row width that can hold a pivot header column
pub const MIN_PIVOT_ROW_WIDTH: usize = 2;

/// Smallest span of the exhaustive row and column searches
pub const MIN_EXHAUSTIVE_SPAN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    SelfCell,
    AdjacentPair(usize),
    ExhaustiveRow(usize),
    ExhaustiveColumn(usize),
    PivotEntry(usize),
    Done,
}

/// Lazy, ordered sequence of search patterns for one anchor.
///
/// Cloning the iterator restarts it from the same position.
#[derive(Debug, Clone)]
pub struct SearchPatterns {
    anchor_row: usize,
    /// Cells from the anchor to the end of its row
    remaining_width: usize,
    /// Rows from the anchor to the bottom of the table
    remaining_height: usize,
    pivot_search: bool,
    pivot_entry: bool,
    stage: Stage,
}

impl SearchPatterns {
    /// Patterns for the anchor `(j, k)` in a table of `table_height` rows
    /// whose anchor row has `row_len` cells and whose first row has
    /// `first_row_len` cells.
    pub fn new(
        j: usize,
        k: usize,
        row_len: usize,
        table_height: usize,
        first_row_len: usize,
        pivot_search: bool,
    ) -> Self {
        let pivot_entry = pivot_search
            && k == 0
            && row_len >= MIN_PIVOT_ROW_WIDTH
            && row_len == first_row_len;
        Self {
            anchor_row: j,
            remaining_width: row_len.saturating_sub(k),
            remaining_height: table_height.saturating_sub(j),
            pivot_search,
            pivot_entry,
            stage: Stage::SelfCell,
        }
    }

    /// Patterns for the anchor `(j, k)` of `table`
    pub fn for_table(table: &Table, j: usize, k: usize, pivot_search: bool) -> Self {
        let row_len = table.row(j).map_or(0, <[String]>::len);
        let first_row_len = table.row(0).map_or(0, <[String]>::len);
        Self::new(j, k, row_len, table.height(), first_row_len, pivot_search)
    }

    /// Move to the first non-empty stage at or after `stage`
    fn enter(&self, stage: Stage) -> Stage {
        let mut stage = stage;
        loop {
            stage = match stage {
                Stage::AdjacentPair(kk) if kk + 1 >= self.remaining_width => {
                    Stage::ExhaustiveRow(MIN_EXHAUSTIVE_SPAN)
                }
                Stage::ExhaustiveRow(span) if span > self.remaining_width => {
                    if self.pivot_search {
                        Stage::ExhaustiveColumn(MIN_EXHAUSTIVE_SPAN)
                    } else {
                        Stage::Done
                    }
                }
                Stage::ExhaustiveColumn(span) if span > self.remaining_height => {
                    if self.pivot_entry {
                        Stage::PivotEntry(1)
                    } else {
                        Stage::Done
                    }
                }
                Stage::PivotEntry(kk) if kk >= self.remaining_width => Stage::Done,
                other => return other,
            };
        }
    }
}

impl Iterator for SearchPatterns {
    type Item = SearchPattern;

    fn next(&mut self) -> Option<Self::Item> {
        let (pattern, next) = match self.stage {
            Stage::SelfCell => (vec![(0, 0)], Stage::AdjacentPair(1)),
            Stage::AdjacentPair(kk) => {
                let kk = kk as isize;
                (
                    vec![(0, 0), (0, kk), (0, kk + 1)],
                    Stage::AdjacentPair(kk as usize + 1),
                )
            }
            Stage::ExhaustiveRow(span) => (
                (0..span as isize).map(|dk| (0, dk)).collect(),
                Stage::ExhaustiveRow(span + 1),
            ),
            Stage::ExhaustiveColumn(span) => (
                (0..span as isize).map(|dj| (dj, 0)).collect(),
                Stage::ExhaustiveColumn(span + 1),
            ),
            Stage::PivotEntry(kk) => {
                let kk = kk as isize;
                (
                    vec![(0, 0), (-(self.anchor_row as isize), kk), (0, kk)],
                    Stage::PivotEntry(kk as usize + 1),
                )
            }
            Stage::Done => return None,
        };
        self.stage = self.enter(next);
        Some(pattern)
    }
}

impl FusedIterator for SearchPatterns {}

/// Concatenate the cells a pattern selects around `(j, k)`.
///
/// Cells with identical text are included once, in pattern order.
pub fn candidate_string(table: &Table, j: usize, k: usize, pattern: &[(isize, isize)]) -> String {
    let mut target: Vec<&str> = Vec::with_capacity(pattern.len());
    for &(dj, dk) in pattern {
        if let Some((jj, kk)) = table.resolve(j, k, dj, dk) {
            let cell = table.rows[jj][kk].as_str();
            if !target.contains(&cell) {
                target.push(cell);
            }
        }
    }
    target.join(" ")
}
