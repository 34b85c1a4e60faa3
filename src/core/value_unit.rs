//! Value and unit parsing
//!
//! Given a candidate string (the concatenated cells of a search pattern, or
//! a sentence window) and the units of a key, decide whether the string
//! holds a valid value and, when the key requires one, a valid unit.
//!
//! The unit is searched first. Every unit or symbol of the whole domain
//! knowledge takes part in the search, so that a unit belonging to another
//! key is recognised as such and rejects the candidate instead of being
//! mistaken for part of the value.

use std::collections::BTreeSet;

use regex::Regex;

use crate::data::expressions::{unit_expression, VALUE};
use crate::data::knowledge::DomainKnowledge;
use crate::utils::error::{KvuError, KvuResult};

/// Compiled unit and symbol expressions of a whole domain knowledge.
///
/// Built once per extraction call; entries are sorted so that the search is
/// independent of hash order.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    all_units: Vec<String>,
    all_symbols: Vec<String>,
    expressions: Vec<(String, Regex)>,
}

impl UnitCatalog {
    pub fn new(knowledge: &DomainKnowledge) -> KvuResult<Self> {
        let all_units: Vec<String> = knowledge.all_units().into_iter().collect();
        let all_symbols: Vec<String> = knowledge.all_symbols().into_iter().collect();
        let terms: BTreeSet<&String> = all_units.iter().chain(all_symbols.iter()).collect();

        let mut expressions = Vec::with_capacity(terms.len());
        for term in terms {
            let regex = unit_expression(term).map_err(|source| KvuError::UnitExpression {
                unit: term.clone(),
                source,
            })?;
            expressions.push((term.clone(), regex));
        }

        Ok(Self {
            all_units,
            all_symbols,
            expressions,
        })
    }

    pub fn all_units(&self) -> &[String] {
        &self.all_units
    }

    pub fn all_symbols(&self) -> &[String] {
        &self.all_symbols
    }

    /// First occurrence of every known unit in `text`
    pub fn find_all(&self, text: &str) -> Vec<UnitMatch> {
        self.expressions
            .iter()
            .filter_map(|(term, regex)| {
                regex.captures(text).and_then(|caps| caps.get(1)).map(|m| UnitMatch {
                    start: m.start(),
                    text: term.clone(),
                })
            })
            .collect()
    }
}

/// A unit found in a candidate string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch {
    /// Byte offset of the unit
    pub start: usize,
    pub text: String,
}

/// Units valid for one key plus the catalogue of all units
#[derive(Debug, Clone)]
pub struct UnitsAndSymbols<'c> {
    pub allowed_units: Vec<String>,
    pub allowed_symbols: Vec<String>,
    catalog: &'c UnitCatalog,
}

impl<'c> UnitsAndSymbols<'c> {
    /// Units of `main_key`; fails when the key has no unit entry
    pub fn for_key(
        main_key: &str,
        knowledge: &DomainKnowledge,
        catalog: &'c UnitCatalog,
    ) -> KvuResult<Self> {
        let entry = knowledge.unit_entry(main_key)?;
        Ok(Self {
            allowed_units: dedup(entry.units()),
            allowed_symbols: dedup(entry.symbols()),
            catalog,
        })
    }

    pub fn catalog(&self) -> &UnitCatalog {
        self.catalog
    }

    /// A key with allowed units or symbols needs a unit next to its value
    pub fn is_unit_required(&self) -> bool {
        !self.allowed_units.is_empty() || !self.allowed_symbols.is_empty()
    }

    pub fn is_allowed(&self, unit: &str) -> bool {
        self.allowed_symbols.iter().any(|s| s == unit) || self.allowed_units.iter().any(|u| u == unit)
    }
}

fn dedup<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.iter().any(|o| o == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Outcome of parsing one candidate string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueUnit {
    pub value: String,
    /// Empty when no unit was found
    pub unit: String,
    pub is_valid: bool,
}

impl ValueUnit {
    fn rejected() -> Self {
        Self::default()
    }
}

/// Parse `text` for a value and unit of the key described by `units`.
///
/// With `unit_check` disabled any found unit is accepted for keys that
/// require one; this only exists for ablation comparisons.
pub fn parse_value_unit(text: &str, units: &UnitsAndSymbols<'_>, unit_check: bool) -> ValueUnit {
    let is_unit_required = units.is_unit_required();
    let mut found = units.catalog.find_all(text);
    let unit = closest_completest_unit(&found);

    let is_unit_correct = match unit {
        Some(u) if unit_check => units.is_allowed(u),
        Some(_) => true,
        None => !is_unit_required,
    };

    match unit {
        // needs a unit, but a wrong one was found
        Some(_) if is_unit_required && !is_unit_correct => return ValueUnit::rejected(),
        // needs no unit, but one was found: the window crossed into another value
        Some(_) if !is_unit_required => return ValueUnit::rejected(),
        _ => {}
    }
    let unit = unit.unwrap_or_default().to_string();

    let value = extract_value(text, &mut found);
    if !is_value_unit_sane(&value, &unit, is_unit_required) {
        return ValueUnit::rejected();
    }

    ValueUnit {
        value,
        unit,
        is_valid: true,
    }
}

/// Final validity predicate of a solution
pub fn is_value_unit_sane(value: &str, unit: &str, is_unit_required: bool) -> bool {
    !value.trim().is_empty() && (!is_unit_required || !unit.trim().is_empty())
}

/// Pick the unit among all matches.
///
/// Matches sharing a start position overlap; the longest of those at the
/// smallest shared position wins ("deg/sec" over "deg"). Without overlaps
/// the match closest to the start of the text wins.
pub fn closest_completest_unit(matches: &[UnitMatch]) -> Option<&str> {
    match matches {
        [] => None,
        [only] => Some(only.text.as_str()),
        _ => {
            let shared_start = matches
                .iter()
                .filter(|m| matches.iter().filter(|o| o.start == m.start).count() > 1)
                .map(|m| m.start)
                .min();
            let chosen = match shared_start {
                Some(start) => matches
                    .iter()
                    .filter(|m| m.start == start)
                    .reduce(|best, m| if m.text.len() > best.text.len() { m } else { best }),
                None => matches
                    .iter()
                    .reduce(|best, m| if m.start < best.start { m } else { best }),
            };
            chosen.map(|m| m.text.as_str())
        }
    }
}

/// Remove every matched unit (longest first) and return the first value
fn extract_value(text: &str, found: &mut [UnitMatch]) -> String {
    found.sort_by(|a, b| b.text.len().cmp(&a.text.len()).then_with(|| a.text.cmp(&b.text)));
    let mut stripped = text.to_string();
    for m in found.iter() {
        stripped = stripped.replace(&m.text, "");
    }
    VALUE
        .find(&stripped)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
