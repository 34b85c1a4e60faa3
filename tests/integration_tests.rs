//! Integration tests for kvu table and text extraction

use kvu::{
    extract_table_kvu, extract_text_kvu, merge, normalize_knowledge, normalize_tables,
    normalize_text, run_pipeline, split_compound_rows, Context, DomainEntry, DomainKnowledge,
    ExtractionOptions, KvuConfig, KvuTuple, NormalizeOptions, Table, TableDocument, TextDocument,
    UnitEntry,
};

fn motor_knowledge() -> DomainKnowledge {
    DomainKnowledge::new()
        .with(
            DomainEntry::with_synonyms("rated power", ["power", "output power"]),
            UnitEntry::from_lists(["watt"], "w", ["kw", "mw"]),
        )
        .with(
            DomainEntry::with_synonyms("voltage", ["rated voltage"]),
            UnitEntry::from_lists(["volt"], "V", ["kV"]),
        )
        .with(
            DomainEntry::new("length"),
            UnitEntry::from_lists(["millimeter"], "mm", Vec::<&str>::new()),
        )
        .with(
            DomainEntry::new("width"),
            UnitEntry::from_lists(["millimeter"], "mm", Vec::<&str>::new()),
        )
        .with(DomainEntry::new("number of slots"), UnitEntry::unitless())
        .with(DomainEntry::new("number of poles"), UnitEntry::unitless())
}

fn single_table(rows: Vec<Vec<&str>>) -> Vec<TableDocument> {
    vec![TableDocument::new("motor.pdf", vec![Table::from_rows(rows)])]
}

fn short(tuples: &[KvuTuple]) -> Vec<(&str, &str, &str, &str)> {
    tuples
        .iter()
        .map(|t| {
            (
                t.main_key.as_str(),
                t.matched_synonym.as_str(),
                t.value.as_str(),
                t.unit.as_str(),
            )
        })
        .collect()
}

// ============================================================================
// Table Extraction
// ============================================================================

mod table_extraction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_and_unit_in_adjacent_cells() {
        let docs = single_table(vec![vec!["voltage", "230/400", "V"]]);
        let tuples = extract_table_kvu(&docs, &motor_knowledge(), &ExtractionOptions::default()).unwrap();
        assert_eq!(short(&tuples), vec![("voltage", "voltage", "230/400", "V")]);
        assert_eq!(
            tuples[0].context,
            Context::Row(vec!["voltage".into(), "230/400".into(), "V".into()])
        );
        assert_eq!(tuples[0].index, 0);
    }

    #[test]
    fn test_pivot_table_needs_pivot_search() {
        let docs = single_table(vec![
            vec!["", "length", "width"],
            vec!["value", "12 mm", "5 mm"],
        ]);
        let knowledge = motor_knowledge();

        let tuples = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::pivot()).unwrap();
        assert_eq!(
            short(&tuples),
            vec![("length", "length", "12", "mm"), ("width", "width", "5", "mm")]
        );

        let tuples = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::default()).unwrap();
        assert!(tuples.is_empty());
    }

    #[test]
    fn test_fuzzy_synonym_threshold() {
        let docs = single_table(vec![vec!["powr", "5.5", "kw"]]);
        let knowledge = motor_knowledge();

        let fuzzy = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::default()).unwrap();
        assert_eq!(short(&fuzzy), vec![("rated power", "power", "5.5", "kw")]);

        let exact = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::strict()).unwrap();
        assert!(exact.is_empty());
    }

    #[test]
    fn test_unit_of_other_key_rejected() {
        let docs = single_table(vec![vec!["power", "12 mm"]]);
        let tuples = extract_table_kvu(&docs, &motor_knowledge(), &ExtractionOptions::default()).unwrap();
        assert!(tuples.is_empty());

        let opts = ExtractionOptions::default().with_unit_check(false);
        let tuples = extract_table_kvu(&docs, &motor_knowledge(), &opts).unwrap();
        assert_eq!(short(&tuples), vec![("rated power", "power", "12", "mm")]);
    }

    #[test]
    fn test_tables_indexed_per_document() {
        let docs = vec![
            TableDocument::new(
                "a.pdf",
                vec![
                    Table::from_rows(vec![vec!["power", "3 kw"]]),
                    Table::from_rows(vec![vec!["number of poles", "4"]]),
                ],
            ),
            TableDocument {
                file: "b.pdf".into(),
                tables: vec![Table::from_rows(vec![vec!["power", "7 kw"]])],
                classification: vec!["motor".into()],
            },
        ];
        let tuples = extract_table_kvu(&docs, &motor_knowledge(), &ExtractionOptions::default()).unwrap();
        let found: Vec<_> = tuples
            .iter()
            .map(|t| (t.file.as_str(), t.index, t.value.as_str()))
            .collect();
        assert_eq!(found, vec![("a.pdf", 0, "3"), ("a.pdf", 1, "4"), ("b.pdf", 0, "7")]);
        assert_eq!(tuples[2].classification, vec!["motor".to_string()]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let docs = single_table(vec![
            vec!["rated power", "5.5 kw", "rated voltage", "400 V"],
            vec!["number of poles", "4", "length", "120 mm"],
            vec!["", "width", "", ""],
            vec!["", "80 mm", "", ""],
        ]);
        let knowledge = motor_knowledge();
        let first = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::pivot()).unwrap();
        for _ in 0..5 {
            let again = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::pivot()).unwrap();
            assert_eq!(first, again);
        }
        assert!(!first.is_empty());
    }

    #[test]
    fn test_missing_unit_entry_is_an_error() {
        let mut knowledge = motor_knowledge();
        knowledge.entries.push(DomainEntry::new("efficiency"));
        let err = extract_table_kvu(&[], &knowledge, &ExtractionOptions::default()).unwrap_err();
        assert!(err.to_string().contains("efficiency"));
    }
}

// ============================================================================
// Row Splitting
// ============================================================================

mod row_splitting {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_then_extract() {
        let knowledge = motor_knowledge();
        let table = Table::from_rows(vec![vec!["number of slots / poles", "36/6"]]);
        let split = split_compound_rows(&table, &knowledge.keyword_set());
        assert_eq!(
            split,
            Table::from_rows(vec![
                vec!["number of slots", "36"],
                vec!["number of poles", "6"],
            ])
        );

        let docs = vec![TableDocument::new("motor.pdf", vec![split])];
        let tuples = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::default()).unwrap();
        assert_eq!(
            short(&tuples),
            vec![
                ("number of slots", "number of slots", "36", ""),
                ("number of poles", "number of poles", "6", ""),
            ]
        );
    }

    #[test]
    fn test_split_is_idempotent() {
        let keywords = motor_knowledge().keyword_set();
        let table = Table::from_rows(vec![
            vec!["number of slots / poles", "36/6"],
            vec!["length [mm] / width", "12/5"],
            vec!["rated power", "5.5 kw"],
        ]);
        let once = split_compound_rows(&table, &keywords);
        assert_eq!(once.height(), 5);
        assert_eq!(split_compound_rows(&once, &keywords), once);
    }

    #[test]
    fn test_split_with_head_noun_keywords() {
        let keywords = ["slots", "poles"].into_iter().map(String::from).collect();
        let table = Table::from_rows(vec![vec!["number of slots / poles", "36/6"]]);
        assert_eq!(
            split_compound_rows(&table, &keywords),
            Table::from_rows(vec![
                vec!["number of slots", "36"],
                vec!["number of poles", "6"],
            ])
        );
    }

    #[test]
    fn test_split_three_entities() {
        let keywords = ["length", "width", "height"]
            .into_iter()
            .map(String::from)
            .collect();
        let table = Table::from_rows(vec![vec!["length / width / height", "12/5/3"]]);
        assert_eq!(
            split_compound_rows(&table, &keywords),
            Table::from_rows(vec![
                vec!["length", "12"],
                vec!["width", "5"],
                vec!["height", "3"],
            ])
        );
    }
}

// ============================================================================
// Text Extraction
// ============================================================================

mod text_extraction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sentence_window() {
        let doc = TextDocument::new("manual.pdf")
            .with_page(4, "the machine is robust . its rated power is 11 kw at full load .");
        let tuples = extract_text_kvu(&[doc], &motor_knowledge(), &ExtractionOptions::default(), 100).unwrap();
        assert_eq!(short(&tuples), vec![("rated power", "rated power", "11", "kw")]);
        assert_eq!(tuples[0].index, 4);
        assert_eq!(tuples[0].context, Context::Text(" is 11 kw at full load .; its ".into()));
    }

    #[test]
    fn test_every_occurrence_is_searched() {
        let doc = TextDocument::new("manual.pdf")
            .with_page(1, "power 3 kw . later the power is 4 kw .");
        let tuples = extract_text_kvu(&[doc], &motor_knowledge(), &ExtractionOptions::default(), 10).unwrap();
        let values: Vec<_> = tuples.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["3", "4"]);
    }
}

// ============================================================================
// Merging and Pipeline
// ============================================================================

mod pipeline {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_prefers_table_results() {
        let knowledge = motor_knowledge();
        let docs = single_table(vec![vec!["power", "5.5 kw"]]);
        let table = extract_table_kvu(&docs, &knowledge, &ExtractionOptions::default()).unwrap();
        let text_doc = TextDocument::new("motor.pdf").with_page(1, "power 5.5 kw . power 7 kw .");
        let text = extract_text_kvu(&[text_doc], &knowledge, &ExtractionOptions::default(), 20).unwrap();

        let merged = merge(table, text);
        assert_eq!(merged.len(), 2);
        assert!(matches!(merged[0].context, Context::Row(_)));
        assert_eq!(merged[1].value, "7");
    }

    #[test]
    fn test_normalization_prepares_raw_input() {
        let knowledge = normalize_knowledge(&motor_knowledge());
        let tables = normalize_tables(
            &[Table::from_rows(vec![vec!["Number of Slots / Poles", "36/6"]])],
            &knowledge,
            &NormalizeOptions::default(),
        );
        assert_eq!(tables[0].height(), 2);
        assert_eq!(normalize_text("Speed:\t1500 r/min"), "speed : 1500 rpm");
    }

    #[test]
    fn test_full_pipeline() {
        let tables = vec![TableDocument::new(
            "motor.pdf",
            vec![Table::from_rows(vec![
                vec!["Rated Power", "5.5 kW"],
                vec!["Number of Slots / Poles", "36/6"],
                vec!["Voltage", "400", "V"],
            ])],
        )];
        let texts = vec![TextDocument::new("motor.pdf").with_page(2, "Output power is 0.5 MW.")];

        let tuples = run_pipeline(&tables, &texts, &motor_knowledge(), &KvuConfig::default()).unwrap();
        let found: Vec<_> = tuples
            .iter()
            .map(|t| (t.main_key.as_str(), t.value.as_str(), t.unit.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("rated power", "5500", "w"),
                ("voltage", "400", "v"),
                ("number of slots", "36", ""),
                ("number of poles", "6", ""),
                ("rated power", "0.0005", "w"),
            ]
        );
    }
}
