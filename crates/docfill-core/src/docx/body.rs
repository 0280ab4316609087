//! Paragraph-level reading and rewriting of WordprocessingML body markup

use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

use super::substitute::Substituter;
use crate::error::Result;
use crate::form::ReplacementMap;

const PARAGRAPH_CLOSE: &str = "</w:p>";

fn paragraph_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:p(?:\s[^>]*)?>|</w:p>").expect("static pattern is a valid regex")
    })
}

fn text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("static pattern is a valid regex")
    })
}

/// A paragraph that contains no nested paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
struct Paragraph {
    /// Whole element, start tag through `</w:p>`
    span: Range<usize>,
    /// The start tag alone
    start_tag: Range<usize>,
}

/// Locate leaf paragraphs in document order
///
/// Self-closing paragraphs are skipped. A paragraph holding another one
/// (text boxes) is not a leaf; only its innermost paragraphs are returned.
fn leaf_paragraphs(xml: &str) -> Vec<Paragraph> {
    // (start tag range, has nested paragraph)
    let mut open: Vec<(Range<usize>, bool)> = Vec::new();
    let mut leaves = Vec::new();

    for m in paragraph_tag_pattern().find_iter(xml) {
        let tag = m.as_str();
        if tag == PARAGRAPH_CLOSE {
            let Some((start_tag, nested)) = open.pop() else {
                continue;
            };
            if !nested {
                leaves.push(Paragraph {
                    span: start_tag.start..m.end(),
                    start_tag,
                });
            }
        } else if tag.ends_with("/>") {
            continue;
        } else {
            if let Some(parent) = open.last_mut() {
                parent.1 = true;
            }
            open.push((m.range(), false));
        }
    }

    leaves
}

/// Unescaped text of every `w:t` element in `xml`, concatenated
fn run_text(xml: &str) -> String {
    text_pattern()
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()).unwrap_or(Cow::Borrowed(m.as_str())))
        .collect()
}

/// Plain text of the body: paragraphs joined with newlines, trimmed
pub fn body_text(xml: &str) -> String {
    let paragraphs: Vec<String> = leaf_paragraphs(xml)
        .into_iter()
        .map(|p| run_text(&xml[p.span]))
        .collect();

    paragraphs.join("\n").trim().to_string()
}

/// Substitute placeholders paragraph by paragraph
///
/// A paragraph whose text changes is rebuilt as its original start tag and
/// `w:pPr`, followed by one run carrying the first run's `w:rPr`. All other
/// markup is copied through untouched.
pub fn rewrite_body(xml: &str, replacements: &ReplacementMap) -> Result<String> {
    let substituter = Substituter::new(replacements)?;
    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;
    let mut rewritten = 0usize;

    for paragraph in leaf_paragraphs(xml) {
        let element = &xml[paragraph.span.clone()];
        let text = run_text(element);
        if text.is_empty() {
            continue;
        }

        let replaced = substituter.apply(&text);
        if replaced == text {
            continue;
        }

        out.push_str(&xml[cursor..paragraph.span.start]);
        let start_tag = &xml[paragraph.start_tag.clone()];
        let inner = &xml[paragraph.start_tag.end..paragraph.span.end - PARAGRAPH_CLOSE.len()];
        out.push_str(&rebuild_paragraph(start_tag, inner, &replaced)?);
        cursor = paragraph.span.end;
        rewritten += 1;
    }
    out.push_str(&xml[cursor..]);

    debug!(paragraphs = rewritten, "rewrote body paragraphs");
    Ok(out)
}

fn rebuild_paragraph(start_tag: &str, inner: &str, text: &str) -> Result<String> {
    let (paragraph_properties, run_properties) = property_spans(inner)?;

    let mut out = String::from(start_tag);
    if let Some(span) = paragraph_properties {
        out.push_str(&inner[span]);
    }
    out.push_str("<w:r>");
    if let Some(span) = run_properties {
        out.push_str(&inner[span]);
    }
    out.push_str(&text_elements(text));
    out.push_str("</w:r>");
    out.push_str(PARAGRAPH_CLOSE);
    Ok(out)
}

/// Byte ranges of the paragraph's `w:pPr` and the first run's `w:rPr`
///
/// Each range covers the whole element, including nested
/// `w:pPrChange`/`w:rPrChange` history.
fn property_spans(inner: &str) -> Result<(Option<Range<usize>>, Option<Range<usize>>)> {
    let mut reader = Reader::from_str(inner);
    let mut depth = 0usize;
    let mut paragraph_properties = None;

    loop {
        let before = position(&reader);
        match reader.read_event()? {
            Event::Start(e) if depth == 0 && e.name().as_ref() == b"w:pPr" => {
                reader.read_to_end(e.name())?;
                paragraph_properties = Some(before..position(&reader));
            }
            Event::Empty(e) if depth == 0 && e.name().as_ref() == b"w:pPr" => {
                paragraph_properties = Some(before..position(&reader));
            }
            Event::Start(e) if e.name().as_ref() == b"w:r" => {
                let run_properties = leading_run_properties(&mut reader)?;
                return Ok((paragraph_properties, run_properties));
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => return Ok((paragraph_properties, None)),
            _ => {}
        }
    }
}

/// `w:rPr` span if it is the first element inside the run just opened
fn leading_run_properties(reader: &mut Reader<&[u8]>) -> Result<Option<Range<usize>>> {
    loop {
        let before = position(reader);
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:rPr" => {
                reader.read_to_end(e.name())?;
                return Ok(Some(before..position(reader)));
            }
            Event::Empty(e) if e.name().as_ref() == b"w:rPr" => {
                return Ok(Some(before..position(reader)));
            }
            Event::Text(_) => {}
            _ => return Ok(None),
        }
    }
}

fn position(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

/// `w:t` elements for `text`, with line breaks as `w:br`
fn text_elements(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, partial_escape(line)))
        .collect::<Vec<_>>()
        .join("<w:br/>")
}
