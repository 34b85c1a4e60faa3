//! Domain knowledge model
//!
//! The domain knowledge is the catalogue the extraction is guided by:
//! - one [`DomainEntry`] per key, holding the ordered synonyms to search for
//! - one [`UnitEntry`] per key, holding the units and symbols a value of
//!   that key may carry
//!
//! Both are plain typed records. An empty [`UnitEntry`] means the key takes
//! unit-less values (e.g. "number of poles").

use std::collections::BTreeSet;

use fxhash::FxHashSet;
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::error::{KvuError, KvuResult};

/// A key and its synonyms
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainEntry {
    /// Canonical key name
    pub main_key: String,
    /// Synonyms in search priority order; the main key is conventionally first
    pub synonyms: Vec<String>,
}

impl DomainEntry {
    pub fn new(main_key: impl Into<String>) -> Self {
        let main_key = main_key.into();
        Self {
            synonyms: vec![main_key.clone()],
            main_key,
        }
    }

    /// Create an entry with the main key followed by `synonyms`.
    ///
    /// Duplicates are dropped, the first occurrence keeps its position.
    pub fn with_synonyms<I, S>(main_key: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = Self::new(main_key);
        for synonym in synonyms {
            let synonym = synonym.into();
            if !entry.synonyms.contains(&synonym) {
                entry.synonyms.push(synonym);
            }
        }
        entry
    }

    /// Synonyms searched for this key
    pub fn search_terms(&self, use_synonyms: bool) -> &[String] {
        if use_synonyms && !self.synonyms.is_empty() {
            &self.synonyms
        } else {
            std::slice::from_ref(&self.main_key)
        }
    }
}

/// Units and symbols accepted for one key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitEntry {
    /// Canonical unit name (first unit listed in the raw catalogue)
    pub base_unit: Option<String>,
    /// All acceptable unit names, including the base unit
    pub prefixed_units: Vec<String>,
    /// Canonical symbol
    pub base_symbol: Option<String>,
    /// All acceptable symbols, including the base symbol
    pub prefixed_symbols: Vec<String>,
}

impl UnitEntry {
    /// Entry for a key whose values carry no unit
    pub fn unitless() -> Self {
        Self::default()
    }

    /// Build an entry the way the raw catalogue defines it: the first unit is
    /// the base unit, `main_symbol` is the base symbol. Blank strings are
    /// ignored.
    pub fn from_lists<U, S>(units: U, main_symbol: &str, symbols: S) -> Self
    where
        U: IntoIterator,
        U::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let prefixed_units: Vec<String> = units
            .into_iter()
            .map(|u| u.as_ref().trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        let base_symbol = Some(main_symbol.trim().to_string()).filter(|s| !s.is_empty());
        let mut prefixed_symbols: Vec<String> = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(base) = &base_symbol {
            if !prefixed_symbols.contains(base) {
                prefixed_symbols.insert(0, base.clone());
            }
        }
        Self {
            base_unit: prefixed_units.first().cloned(),
            prefixed_units,
            base_symbol,
            prefixed_symbols,
        }
    }

    /// Every unit name, base first
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.base_unit
            .iter()
            .chain(self.prefixed_units.iter())
            .map(String::as_str)
    }

    /// Every symbol, base first
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.base_symbol
            .iter()
            .chain(self.prefixed_symbols.iter())
            .map(String::as_str)
    }

    pub fn is_unitless(&self) -> bool {
        self.units().next().is_none() && self.symbols().next().is_none()
    }
}

/// Keys, synonyms and units of one technical domain
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainKnowledge {
    /// Keys in search order
    pub entries: Vec<DomainEntry>,
    /// Unit entries keyed by main key
    pub units: IndexMap<String, UnitEntry>,
}

impl DomainKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key together with its unit entry
    pub fn push(&mut self, entry: DomainEntry, units: UnitEntry) {
        self.units.insert(entry.main_key.clone(), units);
        self.entries.push(entry);
    }

    /// Builder-style variant of [`DomainKnowledge::push`]
    pub fn with(mut self, entry: DomainEntry, units: UnitEntry) -> Self {
        self.push(entry, units);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Unit entry of `main_key`
    pub fn unit_entry(&self, main_key: &str) -> KvuResult<&UnitEntry> {
        self.units
            .get(main_key)
            .ok_or_else(|| KvuError::MissingUnitEntry {
                key: main_key.to_string(),
            })
    }

    /// Fail if any key lacks a unit entry
    pub fn validate(&self) -> KvuResult<()> {
        for entry in &self.entries {
            self.unit_entry(&entry.main_key)?;
        }
        Ok(())
    }

    /// Flattened set of every key and synonym
    pub fn keyword_set(&self) -> FxHashSet<String> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::once(&e.main_key).chain(e.synonyms.iter()))
            .cloned()
            .collect()
    }

    /// Union of all unit names across the catalogue, sorted and deduplicated
    pub fn all_units(&self) -> BTreeSet<String> {
        self.units
            .values()
            .flat_map(|u| u.units())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Union of all symbols across the catalogue, sorted and deduplicated
    pub fn all_symbols(&self) -> BTreeSet<String> {
        self.units
            .values()
            .flat_map(|u| u.symbols())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Raw catalogue entry: `key -> { synonyms, units, main_symbol, symbols }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawKnowledgeEntry {
    pub synonyms: Vec<String>,
    pub units: Vec<String>,
    pub main_symbol: String,
    pub symbols: Vec<String>,
}

impl DomainKnowledge {
    /// Build typed knowledge from the raw catalogue, preserving key order
    pub fn from_raw(raw: &IndexMap<String, RawKnowledgeEntry>) -> Self {
        let mut knowledge = Self::new();
        for (key, entry) in raw {
            let main_key = key.trim();
            knowledge.push(
                DomainEntry::with_synonyms(main_key, entry.synonyms.iter().map(|s| s.trim())),
                UnitEntry::from_lists(&entry.units, &entry.main_symbol, &entry.symbols),
            );
        }
        knowledge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_synonyms_deduplicated() {
        let entry = DomainEntry::with_synonyms("rated power", ["rated power", "power", "power"]);
        assert_eq!(entry.synonyms, vec!["rated power", "power"]);
    }

    #[test]
    fn test_search_terms_without_synonyms() {
        let entry = DomainEntry::with_synonyms("rated power", ["power"]);
        assert_eq!(entry.search_terms(false), &["rated power".to_string()]);
        assert_eq!(entry.search_terms(true).len(), 2);
    }

    #[test]
    fn test_unit_entry_from_lists() {
        let units = UnitEntry::from_lists(["watt", "kilowatt", " "], "w", ["kw"]);
        assert_eq!(units.base_unit.as_deref(), Some("watt"));
        assert_eq!(units.prefixed_units, vec!["watt", "kilowatt"]);
        assert_eq!(units.base_symbol.as_deref(), Some("w"));
        assert_eq!(units.prefixed_symbols, vec!["w", "kw"]);
        assert!(!units.is_unitless());
    }

    #[test]
    fn test_missing_unit_entry_fails() {
        let mut knowledge = DomainKnowledge::new();
        knowledge.entries.push(DomainEntry::new("voltage"));
        let err = knowledge.validate().unwrap_err();
        assert!(err.to_string().contains("voltage"));
    }

    #[test]
    fn test_all_units_sorted() {
        let knowledge = DomainKnowledge::new()
            .with(
                DomainEntry::new("voltage"),
                UnitEntry::from_lists(["volt"], "v", ["kv"]),
            )
            .with(
                DomainEntry::new("power"),
                UnitEntry::from_lists(["watt"], "w", ["kw"]),
            );
        let symbols: Vec<_> = knowledge.all_symbols().into_iter().collect();
        assert_eq!(symbols, vec!["kv", "kw", "v", "w"]);
        assert!(knowledge.keyword_set().contains("power"));
    }

    #[test]
    fn test_from_raw_keeps_order() {
        let mut raw = IndexMap::new();
        raw.insert(
            "voltage".to_string(),
            RawKnowledgeEntry {
                synonyms: vec!["rated voltage".into()],
                units: vec!["volt".into()],
                main_symbol: "v".into(),
                symbols: vec![],
            },
        );
        raw.insert(
            "number of poles".to_string(),
            RawKnowledgeEntry::default(),
        );
        let knowledge = DomainKnowledge::from_raw(&raw);
        assert_eq!(knowledge.entries[0].main_key, "voltage");
        assert_eq!(knowledge.entries[0].synonyms, vec!["voltage", "rated voltage"]);
        assert!(knowledge.units["number of poles"].is_unitless());
    }
}
