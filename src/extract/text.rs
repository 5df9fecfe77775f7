//! Document body-text extraction
//!
//! The two recognized document types each get a [`TextExtractor`]
//! implementation: PDFs go through `pdf-extract`, and DOCX files are opened
//! as the zip archives they are, with the text runs pulled out of
//! `word/document.xml`. Extraction is best-effort throughout; callers absorb
//! errors and carry on without body text.

use crate::extract::DocumentKind;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::Read;
use thiserror::Error;

/// A failed text-extraction attempt (non-fatal; degrades to absent text)
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Docx(String),

    #[error("malformed document XML: {0}")]
    Xml(String),
}

/// Pulls a text body out of raw document bytes
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Returns the extractor for a recognized document kind
pub fn extractor_for(kind: DocumentKind) -> &'static dyn TextExtractor {
    match kind {
        DocumentKind::Pdf => &PdfTextExtractor,
        DocumentKind::Docx => &DocxTextExtractor,
    }
}

/// PDF body text via `pdf-extract`
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

/// DOCX body text: zip archive -> `word/document.xml` -> `w:t` runs
///
/// Paragraphs are joined with newlines, matching how word processors render
/// the document body.
pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let cursor = std::io::Cursor::new(bytes);
        let mut archive =
            zip::ZipArchive::new(cursor).map_err(|e| ExtractionError::Docx(e.to_string()))?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::Docx(e.to_string()))?;

        document_xml_text(&xml)
    }
}

/// Collects the text runs of a WordprocessingML body into paragraphs
fn document_xml_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let piece = t.unescape().map_err(|e| ExtractionError::Xml(e.to_string()))?;
                current.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Xml(e.to_string())),
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}

/// Mines an author name from extracted body text
///
/// Case-insensitive search for an `Author:` label; the first match's rest of
/// line is captured and trimmed. A capture that trims to nothing counts as
/// no match.
pub fn mine_author(text: &str) -> Option<String> {
    let pattern = Regex::new(r"(?i)author:[ \t]*([^\r\n]*)").ok()?;
    let captured = pattern.captures(text)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| captured.to_string())
}
