//! Key-value-unit extraction from running text
//!
//! For each page and key, the first synonym occurring literally in the page
//! decides the key. Around every occurrence a window of `max_len_text`
//! bytes on both sides is cut (widened to char boundaries) and split into
//! sentences. The sentence holding the occurrence is split on the synonym
//! and parsed with the text after the synonym first.

use crate::core::options::ExtractionOptions;
use crate::core::value_unit::{parse_value_unit, UnitCatalog, UnitsAndSymbols};
use crate::data::knowledge::DomainKnowledge;
use crate::data::table::{Context, KvuTuple, TextDocument};
use crate::utils::error::KvuResult;
use crate::utils::text::{ceil_char_boundary, floor_char_boundary, sentence_spans};

/// Default half-width of the text window around a synonym
pub const DEFAULT_MAX_LEN_TEXT: usize = 100;

/// Extract tuples from the text pages of every document.
///
/// Units are always checked against the key; `options.unit_check` only
/// applies to tables.
pub fn extract_text_kvu(
    documents: &[TextDocument],
    knowledge: &DomainKnowledge,
    options: &ExtractionOptions,
    max_len_text: usize,
) -> KvuResult<Vec<KvuTuple>> {
    options.warn_if_loose();
    knowledge.validate()?;
    let catalog = UnitCatalog::new(knowledge)?;

    let mut tuples = Vec::new();
    for document in documents {
        for (&page, text) in &document.pages {
            let before = tuples.len();
            for entry in &knowledge.entries {
                let Some(synonym) = entry
                    .search_terms(options.use_synonyms)
                    .iter()
                    .find(|s| !s.is_empty() && text.contains(s.as_str()))
                else {
                    continue;
                };
                let units = UnitsAndSymbols::for_key(&entry.main_key, knowledge, &catalog)?;

                for candidate in candidates(text, synonym, max_len_text) {
                    let found = parse_value_unit(&candidate, &units, true);
                    if !found.is_valid {
                        continue;
                    }
                    tuples.push(KvuTuple {
                        file: document.file.clone(),
                        main_key: entry.main_key.clone(),
                        matched_synonym: synonym.clone(),
                        value: found.value,
                        unit: found.unit,
                        context: Context::Text(candidate),
                        index: page as usize,
                        classification: document.classification.clone(),
                    });
                }
            }
            tracing::debug!(
                file = %document.file,
                page,
                tuples = tuples.len() - before,
                "extracted page"
            );
        }
    }

    tracing::info!(
        documents = documents.len(),
        tuples = tuples.len(),
        "text extraction finished"
    );
    Ok(tuples)
}

/// Candidate strings `"{right}; {left}"` for every occurrence of `synonym`
pub fn candidates(text: &str, synonym: &str, max_len_text: usize) -> Vec<String> {
    text.match_indices(synonym)
        .filter_map(|(start, _)| {
            let from = floor_char_boundary(text, start.saturating_sub(max_len_text));
            let to = ceil_char_boundary(text, start + synonym.len() + max_len_text);
            let window = &text[from..to];
            let offset = start - from;
            let (s, e) = sentence_spans(window)
                .into_iter()
                .find(|&(s, e)| s <= offset && offset < e)?;
            let (left, right) = window[s..e].split_once(synonym)?;
            Some(format!("{}; {}", right, left))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::knowledge::{DomainEntry, UnitEntry};
    use pretty_assertions::assert_eq;

    fn knowledge() -> DomainKnowledge {
        DomainKnowledge::new()
            .with(
                DomainEntry::with_synonyms("rated power", ["power"]),
                UnitEntry::from_lists(["watt"], "w", ["kw"]),
            )
            .with(
                DomainEntry::new("voltage"),
                UnitEntry::from_lists(["volt"], "v", ["kv"]),
            )
    }

    #[test]
    fn test_candidates_put_right_side_first() {
        let text = "the motor has a rated power of 5.5 kw . it is quiet .";
        assert_eq!(
            candidates(text, "rated power", 100),
            vec![" of 5.5 kw .; the motor has a ".to_string()]
        );
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let text = "ΩΩΩ rated power 3 kw";
        // a window edge inside 'Ω' must widen, not panic
        let found = candidates(text, "rated power", 2);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with(" 3"));
    }

    #[test]
    fn test_each_occurrence_uses_its_own_sentence() {
        let text = "power 3 kw . power 4 kw .";
        assert_eq!(
            candidates(text, "power", 100),
            vec![" 3 kw .; ".to_string(), " 4 kw .; ".to_string()]
        );
    }

    #[test]
    fn test_extract_from_pages() {
        let doc = TextDocument::new("motor.pdf")
            .with_page(1, "the motor has a rated power of 5.5 kw . the rated voltage is 400 v .")
            .with_page(2, "no values on this page .");
        let tuples = extract_text_kvu(&[doc], &knowledge(), &ExtractionOptions::default(), 100).unwrap();
        let short: Vec<_> = tuples
            .iter()
            .map(|t| (t.main_key.as_str(), t.value.as_str(), t.unit.as_str(), t.index))
            .collect();
        assert_eq!(short, vec![("rated power", "5.5", "kw", 1), ("voltage", "400", "v", 1)]);
        assert!(matches!(tuples[0].context, Context::Text(_)));
    }

    #[test]
    fn test_first_present_synonym_decides() {
        let doc = TextDocument::new("a.pdf").with_page(1, "power 2 kw .");
        let tuples = extract_text_kvu(&[doc], &knowledge(), &ExtractionOptions::default(), 100).unwrap();
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].matched_synonym, "power");

        let doc = TextDocument::new("a.pdf").with_page(1, "power 2 kw .");
        let opts = ExtractionOptions::default().with_synonyms(false);
        let tuples = extract_text_kvu(&[doc], &knowledge(), &opts, 100).unwrap();
        assert!(tuples.is_empty());
    }
}
