//! Value resolution for compound rows

use crate::data::expressions::{SINGLE_VALUE_WITH_UNIT, VALUE_PAIR};

/// Values found for a split row and the cell they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePair {
    pub left: String,
    pub right: String,
    /// Column of the value cell
    pub column: usize,
}

/// Scan `row` from `start` to the right for the first value cell.
///
/// A value cell holds either two delimiter-joined values ("36/6",
/// "12 mm / 5") or a single value with a unit that applies to both keys.
/// A unit present on one side only is copied to the other.
pub fn find_values(row: &[String], start: usize) -> Option<ValuePair> {
    row.iter().enumerate().skip(start).find_map(|(column, cell)| {
        if let Some(caps) = VALUE_PAIR.captures(cell) {
            let unit_left = caps.name("left_unit").map(|m| m.as_str().trim());
            let unit_right = caps.name("right_unit").map(|m| m.as_str().trim());
            let left = caps["left"].trim();
            let right = caps["right"].trim();
            return Some(ValuePair {
                left: with_unit(left, unit_left.or(unit_right)),
                right: with_unit(right, unit_right.or(unit_left)),
                column,
            });
        }
        if SINGLE_VALUE_WITH_UNIT.is_match(cell) {
            let value = cell.trim().to_string();
            return Some(ValuePair {
                left: value.clone(),
                right: value,
                column,
            });
        }
        None
    })
}

fn with_unit(value: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("{} {}", value, unit),
        _ => value.to_string(),
    }
}
