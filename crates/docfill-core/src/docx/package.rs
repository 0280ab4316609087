use std::io::{Cursor, Read, Seek, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::body::rewrite_body;
use crate::error::{DocfillError, Result};
use crate::form::ReplacementMap;

/// Entry holding the main document markup
pub const BODY_ENTRY: &str = "word/document.xml";

fn open(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocfillError::UnpackFailed(format!("not a valid document container: {}", e)))
}

fn read_body_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<(String, CompressionMethod)> {
    let mut entry = archive
        .by_name(BODY_ENTRY)
        .map_err(|_| DocfillError::UnpackFailed(format!("missing {}", BODY_ENTRY)))?;
    let method = entry.compression();

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| DocfillError::UnpackFailed(format!("cannot read {}: {}", BODY_ENTRY, e)))?;

    Ok((xml, method))
}

/// Body markup of a packaged document
pub fn read_body(bytes: &[u8]) -> Result<String> {
    let mut archive = open(bytes)?;
    let (xml, _) = read_body_entry(&mut archive)?;
    Ok(xml)
}

/// Produce a filled copy of a packaged document
///
/// Only the body entry is rewritten, at its original path and compression
/// method. Every other entry is copied without recompression.
pub fn render(bytes: &[u8], replacements: &ReplacementMap) -> Result<Vec<u8>> {
    let mut archive = open(bytes)?;
    let (xml, method) = read_body_entry(&mut archive)?;
    let rewritten = rewrite_body(&xml, replacements)?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        if entry.name() == BODY_ENTRY {
            drop(entry);
            let options = SimpleFileOptions::default().compression_method(method);
            writer.start_file(BODY_ENTRY, options)?;
            writer.write_all(rewritten.as_bytes())?;
        } else {
            writer.raw_copy_file(entry)?;
        }
    }

    let bytes = writer.finish()?.into_inner();
    debug!(entries = archive.len(), size = bytes.len(), "repackaged document");
    Ok(bytes)
}
