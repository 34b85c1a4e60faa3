//! Loading and writing of extraction inputs and results
//!
//! File formats are chosen by extension:
//! - domain knowledge and configuration: JSON, YAML or TOML
//! - documents and tuples: JSON or YAML
//! - tuple exports: JSON, YAML or CSV
//!
//! Domain knowledge is accepted both in the typed form (`entries` + `units`)
//! and in the raw catalogue form
//! `key -> { synonyms, units, main_symbol, symbols }`.

use std::fs;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::data::knowledge::{DomainKnowledge, RawKnowledgeEntry};
use crate::data::table::{KvuTuple, TableDocument, TextDocument};
use crate::features::pipeline::KvuConfig;
use crate::utils::error::{KvuError, KvuResult};

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Csv,
}

impl Format {
    /// Format of `path`, from its extension
    pub fn from_path(path: &Path) -> KvuResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "csv" => Ok(Format::Csv),
            _ => Err(KvuError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Csv => "csv",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KnowledgeFile {
    Typed(DomainKnowledge),
    Raw(IndexMap<String, RawKnowledgeEntry>),
}

// =============================================================================
// Parsing
// =============================================================================

fn parse<T: DeserializeOwned>(content: &str, format: Format) -> KvuResult<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Yaml => Ok(serde_yaml::from_str(content)?),
        Format::Toml => Ok(toml::from_str(content)?),
        Format::Csv => Err(KvuError::UnsupportedFormat(format.name().to_string())),
    }
}

/// Parse a list; TOML has no top-level arrays
fn parse_list<T: DeserializeOwned>(content: &str, format: Format) -> KvuResult<Vec<T>> {
    match format {
        Format::Json | Format::Yaml => parse(content, format),
        Format::Toml | Format::Csv => Err(KvuError::UnsupportedFormat(format.name().to_string())),
    }
}

pub fn parse_knowledge(content: &str, format: Format) -> KvuResult<DomainKnowledge> {
    let knowledge = match parse::<KnowledgeFile>(content, format)? {
        KnowledgeFile::Typed(knowledge) => knowledge,
        KnowledgeFile::Raw(raw) => DomainKnowledge::from_raw(&raw),
    };
    knowledge.validate()?;
    Ok(knowledge)
}

pub fn parse_config(content: &str, format: Format) -> KvuResult<KvuConfig> {
    let config: KvuConfig = parse(content, format)?;
    config.options.warn_if_loose();
    Ok(config)
}

// =============================================================================
// Files
// =============================================================================

fn read(path: &Path) -> KvuResult<(String, Format)> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), format = format.name(), "read input");
    Ok((content, format))
}

pub fn load_knowledge(path: &Path) -> KvuResult<DomainKnowledge> {
    let (content, format) = read(path)?;
    let knowledge = parse_knowledge(&content, format)?;
    tracing::info!(path = %path.display(), keys = knowledge.len(), "loaded domain knowledge");
    Ok(knowledge)
}

pub fn load_config(path: &Path) -> KvuResult<KvuConfig> {
    let (content, format) = read(path)?;
    parse_config(&content, format)
}

pub fn load_table_documents(path: &Path) -> KvuResult<Vec<TableDocument>> {
    let (content, format) = read(path)?;
    parse_list(&content, format)
}

pub fn load_text_documents(path: &Path) -> KvuResult<Vec<TextDocument>> {
    let (content, format) = read(path)?;
    parse_list(&content, format)
}

pub fn load_tuples(path: &Path) -> KvuResult<Vec<KvuTuple>> {
    let (content, format) = read(path)?;
    parse_list(&content, format)
}

// =============================================================================
// Writing
// =============================================================================

/// Header of the CSV export
pub const CSV_HEADER: [&str; 8] = [
    "file",
    "main_key",
    "matched_synonym",
    "value",
    "unit",
    "context",
    "index",
    "classification",
];

/// Write tuples in `format`
pub fn write_tuples<W: Write>(tuples: &[KvuTuple], format: Format, mut writer: W) -> KvuResult<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, tuples)?;
            writeln!(writer)?;
        }
        Format::Yaml => serde_yaml::to_writer(&mut writer, tuples)?,
        Format::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            csv.write_record(CSV_HEADER)?;
            for tuple in tuples {
                let index = tuple.index.to_string();
                let context = tuple.context.text();
                let classification = tuple.classification.join(";");
                csv.write_record([
                    tuple.file.as_str(),
                    tuple.main_key.as_str(),
                    tuple.matched_synonym.as_str(),
                    tuple.value.as_str(),
                    tuple.unit.as_str(),
                    context.as_str(),
                    index.as_str(),
                    classification.as_str(),
                ])?;
            }
            csv.flush()?;
        }
        Format::Toml => return Err(KvuError::UnsupportedFormat(format.name().to_string())),
    }
    Ok(())
}

/// Write any serializable value as JSON or YAML
pub fn write_value<T: Serialize, W: Write>(value: &T, format: Format, mut writer: W) -> KvuResult<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
        }
        Format::Yaml => serde_yaml::to_writer(&mut writer, value)?,
        Format::Toml | Format::Csv => {
            return Err(KvuError::UnsupportedFormat(format.name().to_string()))
        }
    }
    Ok(())
}
