//! Paragraph extraction from plain text and markdown files.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Read a text document, one paragraph per blank-line separated block.
pub fn read_text_paragraphs(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(split_paragraphs(&content))
}

/// Split text into paragraphs at blank lines.
///
/// Lines inside a paragraph keep their `\n` separators, so a heading
/// followed directly by a subtitle line stays one paragraph.
///
/// # Examples
/// ```
/// use pressroom_publisher::document::split_paragraphs;
///
/// let paragraphs = split_paragraphs("# Bees\nA primer\n\nBees are insects.\n");
/// assert_eq!(paragraphs, vec!["# Bees\nA primer", "Bees are insects."]);
/// ```
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let text = text.trim_start_matches('\u{feff}');
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}
