//! Document readers producing ordered paragraph streams.
//!
//! Readers only preserve order and text (embedded newlines included);
//! they never interpret title markers.

mod docx;
mod text;

use std::path::Path;

pub use docx::{parse_document_xml, read_docx_paragraphs, DOCUMENT_PART};
pub use text::{read_text_paragraphs, split_paragraphs};

use crate::error::{PublisherError, Result};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Word document.
    Docx,

    /// Markdown or plain text.
    Text,
}

impl DocumentFormat {
    /// Detect the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "docx" => Some(Self::Docx),
            "md" | "markdown" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Read the paragraphs of a document, picking the reader by extension.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    match DocumentFormat::from_path(path) {
        Some(DocumentFormat::Docx) => read_docx_paragraphs(path),
        Some(DocumentFormat::Text) => read_text_paragraphs(path),
        None => Err(PublisherError::UnsupportedDocument(path.to_path_buf())),
    }
}
