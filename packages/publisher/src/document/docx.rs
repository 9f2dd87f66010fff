//! Paragraph extraction from Word (.docx) documents.
//!
//! A .docx file is a zip container; the body text lives in
//! `word/document.xml` as a sequence of `<w:p>` paragraphs made of runs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use roxmltree::{Document, Node};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{PublisherError, Result};

/// Zip entry holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Get the tag name without namespace prefix (`p` for `<w:p>`).
fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all child elements with the given local name.
fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Read the paragraphs of a .docx file in document order.
pub fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(ZipError::FileNotFound) => {
            return Err(PublisherError::MissingDocumentPart {
                part: DOCUMENT_PART.to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    }

    let paragraphs = parse_document_xml(&xml)?;
    tracing::debug!(
        path = %path.display(),
        paragraphs = paragraphs.len(),
        "Read .docx document"
    );
    Ok(paragraphs)
}

/// Extract body-level paragraphs from `word/document.xml` content.
///
/// Only direct children of `<w:body>` count, so table cells and headers do
/// not interleave with the article flow. Empty paragraphs are kept; the
/// segmenter decides what blank means.
///
/// # Examples
/// ```
/// use pressroom_publisher::document::parse_document_xml;
///
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body>
///     <w:p><w:r><w:t># Intro to Bees</w:t></w:r></w:p>
///     <w:p/>
///     <w:p><w:r><w:t xml:space="preserve">Bees are </w:t></w:r><w:r><w:t>insects.</w:t></w:r></w:p>
///   </w:body>
/// </w:document>"#;
///
/// let paragraphs = parse_document_xml(xml).unwrap();
/// assert_eq!(paragraphs, vec!["# Intro to Bees", "", "Bees are insects."]);
/// ```
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let doc = Document::parse(xml)?;

    let Some(body) = doc
        .descendants()
        .find(|n| n.is_element() && get_tag_name(*n) == "body")
    else {
        return Ok(Vec::new());
    };

    Ok(find_children(body, "p").map(paragraph_text).collect())
}

/// Text of one `<w:p>`: run text joined, tabs and breaks kept as characters.
fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    let mut text = String::new();

    // Runs can sit inside hyperlinks or smart tags, so walk descendants.
    // Only run children are read: `<w:tab>` also appears in paragraph
    // properties as a tab stop definition.
    for run in paragraph
        .descendants()
        .filter(|n| n.is_element() && get_tag_name(*n) == "r")
    {
        for child in run.children().filter(Node::is_element) {
            match get_tag_name(child) {
                "t" => text.push_str(child.text().unwrap_or_default()),
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                _ => {}
            }
        }
    }

    text
}
