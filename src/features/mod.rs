//! Feature modules - processing around the extraction core
//!
//! This module contains the steps that surround extraction:
//! - Normalization of tables, text and domain knowledge
//! - Unit conversion of extracted tuples
//! - The end-to-end pipeline
//! - Loading inputs and writing results (feature `data-loading`)

pub mod convert;
#[cfg(feature = "data-loading")]
pub mod loader;
pub mod normalize;
pub mod pipeline;

// Re-export commonly used items
pub use convert::{convert_units, needs_radius_conversion};
#[cfg(feature = "data-loading")]
pub use loader::Format;
pub use normalize::{
    normalize_document, normalize_knowledge, normalize_pages, normalize_tables, normalize_text,
    NormalizeOptions,
};
pub use pipeline::{run_pipeline, KvuConfig};
