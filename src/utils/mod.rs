//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - String helpers (char boundaries, sentences, word containment)

pub mod error;
pub mod text;

// Re-export commonly used items
pub use error::{KvuError, KvuResult};
pub use text::{contains_words, split_sentences};
