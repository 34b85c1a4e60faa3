//! Data layer - domain model, static tables and expressions
//!
//! This module contains the data the extraction engine works on:
//! - Domain knowledge (keys, synonyms, units)
//! - Tables, documents and extracted tuples
//! - Compiled regular expressions
//! - Static replacement and SI prefix tables

pub mod expressions;
pub mod knowledge;
pub mod replacements;
pub mod table;

// Re-export commonly used items
pub use expressions::{unit_expression, MULTIPLE_ENTRY_DELIMITER, VALUE};
pub use knowledge::{DomainEntry, DomainKnowledge, RawKnowledgeEntry, UnitEntry};
pub use replacements::{prefix_exponent, REPLACE_PATTERNS, SI_PREFIXES};
pub use table::{Context, KvuTuple, Table, TableDocument, TextDocument};
