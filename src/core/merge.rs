//! Merging table and text results

use fxhash::FxHashSet;

use crate::data::table::KvuTuple;

/// Concatenate table and text tuples, drop later duplicates and stable-sort
/// by file.
///
/// Two tuples are duplicates when file, key, matched synonym, value and unit
/// are equal; the context may differ.
pub fn merge(table: Vec<KvuTuple>, text: Vec<KvuTuple>) -> Vec<KvuTuple> {
    let total = table.len() + text.len();
    let mut seen = FxHashSet::default();
    let mut merged: Vec<KvuTuple> = Vec::with_capacity(total);
    for tuple in table.into_iter().chain(text) {
        let (file, key, synonym, value, unit) = tuple.identity();
        let identity = [file, key, synonym, value, unit].map(str::to_owned);
        if seen.insert(identity) {
            merged.push(tuple);
        }
    }
    merged.sort_by(|a, b| a.file.cmp(&b.file));

    tracing::debug!(total, merged = merged.len(), "merged results");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Context;
    use pretty_assertions::assert_eq;

    fn tuple(file: &str, key: &str, value: &str, context: Context) -> KvuTuple {
        KvuTuple {
            file: file.to_string(),
            main_key: key.to_string(),
            matched_synonym: key.to_string(),
            value: value.to_string(),
            unit: "kw".to_string(),
            context,
            index: 0,
            classification: Vec::new(),
        }
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let table = vec![tuple("a.pdf", "power", "5", Context::Row(vec!["power".into()]))];
        let text = vec![
            tuple("a.pdf", "power", "5", Context::Text("power 5 kw".into())),
            tuple("a.pdf", "power", "7", Context::Text("power 7 kw".into())),
        ];
        let merged = merge(table, text);
        assert_eq!(merged.len(), 2);
        assert!(matches!(merged[0].context, Context::Row(_)));
        assert_eq!(merged[1].value, "7");
    }

    #[test]
    fn test_sorted_by_file_stable() {
        let table = vec![
            tuple("b.pdf", "power", "1", Context::Text(String::new())),
            tuple("a.pdf", "power", "2", Context::Text(String::new())),
        ];
        let text = vec![tuple("a.pdf", "speed", "3", Context::Text(String::new()))];
        let merged = merge(table, text);
        let order: Vec<_> = merged.iter().map(|t| (t.file.as_str(), t.value.as_str())).collect();
        assert_eq!(order, vec![("a.pdf", "2"), ("a.pdf", "3"), ("b.pdf", "1")]);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(Vec::new(), Vec::new()).is_empty());
    }
}
