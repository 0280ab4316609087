//! In-memory `.docx` fixtures
//!
//! Word documents are zip containers. Tests only need a handful of entries,
//! so [`DocxBuilder`] assembles the smallest container the renderer accepts
//! and lets a test shape the body paragraph by paragraph.

use std::io::{Cursor, Read, Write};

/// Path of the body markup inside a Word container
pub const BODY_ENTRY: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Styles part; tests compare it byte-for-byte after rendering
pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = r#"<w:sectPr/></w:body></w:document>"#;

/// Builder for minimal Word containers
///
/// # Examples
///
/// ```rust
/// use docfill_testkit::{DocxBuilder, read_entry};
///
/// let bytes = DocxBuilder::new()
///     .paragraph("Dear {name},")
///     .blank()
///     .runs(&["Amount due: {{amo", "unt}}"])
///     .build();
///
/// let body = read_entry(&bytes, "word/document.xml").unwrap();
/// assert!(body.contains("Dear {name},"));
/// ```
#[derive(Debug, Clone)]
pub struct DocxBuilder {
    paragraphs: Vec<String>,
    extra_entries: Vec<(String, Vec<u8>)>,
    include_body: bool,
}

impl DocxBuilder {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            extra_entries: Vec::new(),
            include_body: true,
        }
    }

    /// Append a paragraph holding a single plain run
    pub fn paragraph(self, text: &str) -> Self {
        self.runs(&[text])
    }

    /// Append a paragraph whose text is split across several runs
    ///
    /// Every second run is bold, the way Word splits text at formatting
    /// boundaries.
    pub fn runs(mut self, texts: &[&str]) -> Self {
        let mut xml = String::from("<w:p>");
        for (i, text) in texts.iter().enumerate() {
            xml.push_str("<w:r>");
            if i % 2 == 1 {
                xml.push_str("<w:rPr><w:b/></w:rPr>");
            }
            xml.push_str(&text_element(text));
            xml.push_str("</w:r>");
        }
        xml.push_str("</w:p>");
        self.paragraphs.push(xml);
        self
    }

    /// Append a paragraph with properties and a styled first run
    pub fn styled_paragraph(mut self, style: &str, text: &str) -> Self {
        self.paragraphs.push(format!(
            r#"<w:p w:rsidR="00A1B2C3"><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:rPr><w:i/></w:rPr>{}</w:r></w:p>"#,
            text_element(text)
        ));
        self
    }

    /// Append a self-closing blank-line paragraph
    pub fn blank(mut self) -> Self {
        self.paragraphs.push("<w:p/>".to_string());
        self
    }

    /// Append raw paragraph markup verbatim
    pub fn raw(mut self, xml: &str) -> Self {
        self.paragraphs.push(xml.to_string());
        self
    }

    /// Add an additional container entry (media, metadata, ...)
    pub fn entry(mut self, name: &str, data: &[u8]) -> Self {
        self.extra_entries.push((name.to_string(), data.to_vec()));
        self
    }

    /// Leave out `word/document.xml`
    pub fn without_body(mut self) -> Self {
        self.include_body = false;
        self
    }

    /// Body markup as it will be stored in the container
    pub fn document_xml(&self) -> String {
        let mut xml = String::from(DOCUMENT_OPEN);
        for paragraph in &self.paragraphs {
            xml.push_str(paragraph);
        }
        xml.push_str(DOCUMENT_CLOSE);
        xml
    }

    /// Assemble the container
    ///
    /// # Panics
    ///
    /// Panics if the zip writer fails, which only happens on allocation failure
    pub fn build(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options: zip::write::FileOptions<'_, ()> =
            zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut write = |name: &str, data: &[u8]| {
            zip.start_file(name, options).expect("Failed to start zip entry");
            zip.write_all(data).expect("Failed to write zip entry");
        };

        write("[Content_Types].xml", CONTENT_TYPES.as_bytes());
        write("_rels/.rels", ROOT_RELS.as_bytes());
        if self.include_body {
            write(BODY_ENTRY, self.document_xml().as_bytes());
        }
        write("word/styles.xml", STYLES_XML.as_bytes());
        for (name, data) in &self.extra_entries {
            write(name, data);
        }

        zip.finish()
            .expect("Failed to finish zip archive")
            .into_inner()
    }
}

impl Default for DocxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a container entry as UTF-8 text
pub fn read_entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
    let mut file = archive.by_name(name).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Read a container entry as raw bytes
pub fn read_entry_bytes(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
    let mut file = archive.by_name(name).ok()?;
    let mut content = Vec::new();
    file.read_to_end(&mut content).ok()?;
    Some(content)
}

/// Entry names in container order
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let Ok(mut archive) = zip::ZipArchive::new(Cursor::new(bytes)) else {
        return Vec::new();
    };
    (0..archive.len())
        .filter_map(|i| archive.by_index_raw(i).ok().map(|f| f.name().to_string()))
        .collect()
}

fn text_element(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    if text.starts_with(' ') || text.ends_with(' ') {
        format!(r#"<w:t xml:space="preserve">{escaped}</w:t>"#)
    } else {
        format!("<w:t>{escaped}</w:t>")
    }
}
