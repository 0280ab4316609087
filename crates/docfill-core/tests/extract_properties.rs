//! Property tests for tag extraction and substitution

use docfill_core::docx::substitute;
use docfill_core::form::ReplacementMap;
use docfill_core::tags::{extract_tags, BaseKind, Tag};
use proptest::prelude::*;
use std::collections::HashSet;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn base() -> impl Strategy<Value = BaseKind> {
    prop_oneof![
        Just(BaseKind::Text),
        Just(BaseKind::Number),
        Just(BaseKind::Date),
    ]
}

fn options() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9 ]{1,8}", 0..4)
}

/// Distinct-name tags
fn tags() -> impl Strategy<Value = Vec<Tag>> {
    prop::collection::vec((name(), base(), options()), 1..8).prop_map(|specs| {
        let mut seen = HashSet::new();
        specs
            .into_iter()
            .filter(|(name, _, _)| seen.insert(name.clone()))
            .map(|(name, base, options)| {
                let options: Vec<String> = options.into_iter().map(|o| o.trim().to_string()).collect();
                if options.iter().any(|o| o.is_empty()) || options.is_empty() {
                    Tag::new(name, base)
                } else {
                    Tag::with_options(name, base, options)
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn extracts_every_rendered_placeholder(tags in tags()) {
        let text = tags
            .iter()
            .map(|t| format!("Field {}.", t.placeholder()))
            .collect::<Vec<_>>()
            .join("\n");

        let extracted = extract_tags(&text);
        prop_assert_eq!(extracted.len(), tags.len());
        for tag in &tags {
            let found = extracted.iter().find(|t| t.name == tag.name);
            prop_assert_eq!(found, Some(tag));
        }
    }

    #[test]
    fn names_are_unique(text in "[a-z{}/', ]{0,60}") {
        let extracted = extract_tags(&text);
        let names: HashSet<&str> = extracted.iter().map(|t| t.name.as_str()).collect();
        prop_assert_eq!(names.len(), extracted.len());
    }

    #[test]
    fn substitution_clears_all_fields(tags in tags()) {
        let text = tags
            .iter()
            .map(|t| t.placeholder())
            .collect::<Vec<_>>()
            .join(" ");
        let replacements: ReplacementMap =
            tags.iter().map(|t| (t.name.clone(), "value")).collect();

        let filled = substitute(&text, &replacements).unwrap();
        prop_assert!(extract_tags(&filled).is_empty());
    }
}
