//! Document link discovery and text extraction
//!
//! This module scans page markup for anchors pointing at recognized document
//! types, harvests positional context from the surrounding markup, and pulls
//! body text out of the documents themselves.

mod context;
mod links;
mod text;

pub use context::{ContextStrategy, ParentTextContext};
pub use links::{scan_document_links, DocumentExtractor, DocumentRecord, LinkCandidate};
pub use text::{
    extractor_for, mine_author, DocxTextExtractor, ExtractionError, PdfTextExtractor,
    TextExtractor,
};

/// Recognized document types, keyed by link suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classifies an href by its file suffix (case-insensitive)
    ///
    /// Returns `None` for anything that is not a `.pdf`, `.doc`, or `.docx`
    /// target.
    pub fn from_href(href: &str) -> Option<Self> {
        let lower = href.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}
