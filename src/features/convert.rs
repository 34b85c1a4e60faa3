//! Unit conversion of extracted tuples
//!
//! Values carrying an SI-prefixed form of their key's base symbol are
//! converted to the base symbol ("5.5 kw" -> "5500 w"). Values that are not
//! a single number (ranges, dimensions) are left as they are.
//!
//! A key naming a diameter whose context talks about a radius gets its
//! value doubled.

use crate::data::knowledge::DomainKnowledge;
use crate::data::replacements::prefix_exponent;
use crate::data::table::KvuTuple;

/// Convert every tuple to the base symbol of its key
pub fn convert_units(tuples: Vec<KvuTuple>, knowledge: &DomainKnowledge) -> Vec<KvuTuple> {
    tuples
        .into_iter()
        .map(|tuple| convert_tuple(tuple, knowledge))
        .collect()
}

fn convert_tuple(mut tuple: KvuTuple, knowledge: &DomainKnowledge) -> KvuTuple {
    let base = knowledge
        .units
        .get(&tuple.main_key)
        .and_then(|entry| entry.base_symbol.as_deref());

    if let Some(base) = base {
        if !tuple.unit.is_empty() && tuple.unit != base {
            match (parse_number(&tuple.value), prefix_exponent(&tuple.unit, base)) {
                (Some(value), Some(exponent)) => {
                    tracing::debug!(
                        key = %tuple.main_key,
                        from = %tuple.unit,
                        to = base,
                        "converting unit"
                    );
                    tuple.value = format_number(scale(value, exponent));
                    tuple.unit = base.to_string();
                }
                _ => tracing::warn!(
                    key = %tuple.main_key,
                    value = %tuple.value,
                    unit = %tuple.unit,
                    "unit not converted"
                ),
            }
        }
    }

    if needs_radius_conversion(&tuple) {
        match parse_number(&tuple.value) {
            Some(radius) => {
                tracing::debug!(key = %tuple.main_key, radius, "radius to diameter");
                tuple.value = format_number(radius * 2.0);
            }
            None => tracing::warn!(
                key = %tuple.main_key,
                value = %tuple.value,
                "radius not converted"
            ),
        }
    }
    tuple
}

/// Diameter keys whose context states a radius
pub fn needs_radius_conversion(tuple: &KvuTuple) -> bool {
    let context = tuple.context.text();
    tuple.main_key.to_lowercase().contains("diameter")
        && (context.contains("radius") || context.contains("radii"))
}

/// Parse a single number, ignoring spaces and thousands separators
fn parse_number(value: &str) -> Option<f64> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    compact.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn scale(value: f64, exponent: i32) -> f64 {
    let factor = 10f64.powi(exponent.abs());
    if exponent < 0 {
        value / factor
    } else {
        value * factor
    }
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}
