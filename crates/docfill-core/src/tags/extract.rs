//! Tag extraction
//!
//! One pass per brace depth, widest first, against a shrinking working copy
//! of the text. A single seen-name set makes the first discovery of a name
//! authoritative.

use super::model::{BaseKind, Tag};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Scan order; determines kind precedence
const SCAN_ORDER: [BaseKind; 3] = [BaseKind::Date, BaseKind::Number, BaseKind::Text];

fn span_pattern(base: BaseKind) -> &'static Regex {
    static TRIPLE: OnceLock<Regex> = OnceLock::new();
    static DOUBLE: OnceLock<Regex> = OnceLock::new();
    static SINGLE: OnceLock<Regex> = OnceLock::new();

    let (cell, source) = match base {
        BaseKind::Date => (&TRIPLE, r"\{\{\{([^}]+)\}\}\}"),
        BaseKind::Number => (&DOUBLE, r"\{\{([^}]+)\}\}"),
        BaseKind::Text => (&SINGLE, r"\{([^}]+)\}"),
    };
    cell.get_or_init(|| Regex::new(source).expect("span pattern is a valid regex"))
}

/// Extract the ordered, deduplicated field list from document text
///
/// Output order is discovery order: every date tag first, then numbers, then
/// text, each group in source order. Unbalanced braces are never captured
/// and never raise an error.
pub fn extract_tags(text: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut remaining = text.to_string();

    for base in SCAN_ORDER {
        let spans: Vec<(String, String)> = span_pattern(base)
            .captures_iter(&remaining)
            .map(|caps| (caps[0].to_string(), caps[1].to_string()))
            .collect();

        for (span, content) in &spans {
            let Some(tag) = parse_span(content, base) else {
                debug!(span = %span, "skipping placeholder without a name");
                continue;
            };
            if tag.name.contains('\n') {
                warn!(name = %tag.name, "placeholder spans paragraphs and cannot be filled");
            }
            if seen.insert(tag.name.clone()) {
                debug!(name = %tag.name, kind = %tag.kind, options = tag.options.len(), "found tag");
                tags.push(tag);
            } else {
                debug!(name = %tag.name, kind = %tag.kind, "dropping repeated tag name");
            }
        }

        // Cut this depth's spans out so shallower passes cannot re-match them
        for (span, _) in &spans {
            remaining = remaining.replacen(span.as_str(), "", 1);
        }
    }

    debug!(count = tags.len(), "tag extraction finished");
    tags
}

/// Parse the text between the braces into a tag
fn parse_span(content: &str, base: BaseKind) -> Option<Tag> {
    let content = content.trim();
    let tag = match content.split_once('/') {
        Some((name, options)) => {
            let options = options.trim().split(',').map(clean_option).collect();
            Tag::with_options(name.trim(), base, options)
        }
        None => Tag::new(content, base),
    };
    (!tag.name.is_empty()).then_some(tag)
}

/// Trim an option and strip one surrounding quote character from each end
pub fn clean_option(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['\'', '"'])
        .unwrap_or(trimmed);
    trimmed
        .strip_suffix(['\'', '"'])
        .unwrap_or(trimmed)
        .to_string()
}
