//! WASM bindings for kvu
//!
//! This module provides JavaScript-accessible functions for key-value-unit
//! extraction. Inputs and outputs cross the boundary as plain JS objects.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{
    DomainKnowledge, ExtractionOptions, KvuConfig, KvuTuple, RawKnowledgeEntry, Table,
    TableDocument, TextDocument,
};

/// Extraction result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ExtractResult {
    /// The extracted tuples
    pub tuples: Vec<KvuTuple>,
    /// Whether the extraction was successful
    pub success: bool,
    /// Error message if extraction failed
    pub error: Option<String>,
}

#[cfg(feature = "wasm")]
impl ExtractResult {
    fn from_result(result: crate::KvuResult<Vec<KvuTuple>>) -> Self {
        match result {
            Ok(tuples) => Self {
                tuples,
                success: true,
                error: None,
            },
            Err(err) => Self {
                tuples: Vec::new(),
                success: false,
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(feature = "wasm")]
#[derive(Deserialize)]
#[serde(untagged)]
enum KnowledgeInput {
    Typed(DomainKnowledge),
    Raw(indexmap::IndexMap<String, RawKnowledgeEntry>),
}

#[cfg(feature = "wasm")]
fn knowledge_from_js(value: JsValue) -> Result<DomainKnowledge, JsValue> {
    let input: KnowledgeInput = serde_wasm_bindgen::from_value(value)?;
    Ok(match input {
        KnowledgeInput::Typed(knowledge) => knowledge,
        KnowledgeInput::Raw(raw) => DomainKnowledge::from_raw(&raw),
    })
}

#[cfg(feature = "wasm")]
fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Extract tuples from table documents
///
/// # Arguments
/// * `documents` - array of `{ file, tables, classification }`
/// * `knowledge` - typed or raw domain knowledge
/// * `options` - extraction options; missing fields take their defaults
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "extractTableKvu")]
pub fn extract_table_kvu_wasm(
    documents: JsValue,
    knowledge: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let documents: Vec<TableDocument> = serde_wasm_bindgen::from_value(documents)?;
    let knowledge = knowledge_from_js(knowledge)?;
    let options: ExtractionOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let result = crate::extract_table_kvu(&documents, &knowledge, &options);
    Ok(to_js(&ExtractResult::from_result(result)))
}

/// Normalize all inputs, extract from tables and text, merge and convert
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "runPipeline")]
pub fn run_pipeline_wasm(
    tables: JsValue,
    texts: JsValue,
    knowledge: JsValue,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let tables: Vec<TableDocument> = serde_wasm_bindgen::from_value(tables)?;
    let texts: Vec<TextDocument> = serde_wasm_bindgen::from_value(texts).unwrap_or_default();
    let knowledge = knowledge_from_js(knowledge)?;
    let config: KvuConfig = serde_wasm_bindgen::from_value(config).unwrap_or_default();
    let result = crate::run_pipeline(&tables, &texts, &knowledge, &config);
    Ok(to_js(&ExtractResult::from_result(result)))
}

/// Split compound rows of one table
///
/// # Arguments
/// * `table` - rows of cell strings
/// * `keywords` - known keys and synonyms
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "splitCompoundRows")]
pub fn split_compound_rows_wasm(table: JsValue, keywords: Vec<String>) -> Result<JsValue, JsValue> {
    let table: Table = serde_wasm_bindgen::from_value(table)?;
    let keywords = keywords.into_iter().collect();
    Ok(to_js(&crate::split_compound_rows(&table, &keywords)))
}

/// Normalize one string the way tables and text are normalized
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "normalizeText")]
pub fn normalize_text_wasm(text: &str) -> String {
    crate::normalize_text(text)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
