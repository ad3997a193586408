//! Property-based tests - generative checks on the write-then-parse path.
//!
//! These complement the integration tests by pushing arbitrary (but
//! well-formed) section names, keys, and values through a full document
//! round trip.

use initext::{IniDocument, IniSection};
use proptest::prelude::*;

/// Names that survive tokenization: no delimiters, brackets, or newlines,
/// and no leading/trailing whitespace to be trimmed away.
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_.-]{0,15}"
}

/// Values the standard dialect reads back verbatim: printable, no quote or
/// delimiter characters, no surrounding whitespace.
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:@+-]{0,24}"
}

fn build_document(sections: &[(String, Vec<(String, String)>)]) -> IniDocument {
    let mut doc = IniDocument::new();
    for (name, keys) in sections {
        let mut section = IniSection::new(name.clone());
        for (key, value) in keys {
            section.set(key, value, None);
        }
        doc.add_section(section);
    }
    doc
}

proptest! {
    #[test]
    fn prop_document_round_trip(
        sections in prop::collection::vec(
            (
                name_strategy(),
                prop::collection::vec((name_strategy(), value_strategy()), 0..6),
            ),
            0..5,
        )
    ) {
        let doc = build_document(&sections);
        let rendered = doc.to_string();
        let reparsed = IniDocument::from_str(&rendered).unwrap();

        // add_section deduplicates names, so compare against the model
        prop_assert_eq!(doc.sections().len(), reparsed.sections().len());
        for section in doc.sections() {
            let other = reparsed.section(section.name()).unwrap();
            prop_assert_eq!(section.keys(), other.keys());
            for key in section.keys() {
                prop_assert_eq!(section.get(key), other.get(key));
            }
        }
    }

    #[test]
    fn prop_comments_survive_round_trip(
        comment in "[A-Za-z][A-Za-z0-9 ]{0,19}",
        key in name_strategy(),
        value in value_strategy(),
    ) {
        let mut doc = IniDocument::new();
        doc.push_leading_comment(&comment);
        let mut section = IniSection::new("s");
        section.set(&key, &value, Some(&comment));
        doc.add_section(section);

        let reparsed = IniDocument::from_str(&doc.to_string()).unwrap();
        let trimmed = comment.trim_end().to_string();
        prop_assert_eq!(
            reparsed.leading_comments(),
            &[Some(trimmed.clone())]
        );
        let item = reparsed.section("s").unwrap().item(0).unwrap();
        prop_assert_eq!(item.comment(), Some(trimmed.as_str()));
    }

    #[test]
    fn prop_quoted_values_preserve_whitespace(
        inner in "[A-Za-z0-9 ]{0,20}",
    ) {
        let input = format!("[s]\nk = \"{inner}\"\n");
        let doc = IniDocument::from_str(&input).unwrap();
        prop_assert_eq!(doc.section("s").unwrap().get("k"), Some(inner.as_str()));
    }

    #[test]
    fn prop_expansion_is_pure_without_write_back(
        value in "[A-Za-z0-9]{1,12}",
    ) {
        use initext::ConfigSet;

        let mut set = ConfigSet::new();
        let config = set.add("s");
        config.set("base", &value);
        config.set("derived", "${base}/suffix");

        let expanded = set.get_expanded("s", "derived").unwrap();
        prop_assert_eq!(expanded, format!("{value}/suffix"));
        prop_assert_eq!(set.get("s").unwrap().get("derived"), Some("${base}/suffix"));
    }
}
