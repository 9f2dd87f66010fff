//! Line-level helpers: marker detection, title extraction, content cleaning.

/// Prefix that turns a paragraph into a title marker (markdown level-1 heading).
pub const TITLE_MARKER: &str = "# ";

/// Whether a paragraph carries no text at all.
///
/// Whitespace-only paragraphs count as blank.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Whether a paragraph starts a new article.
///
/// # Examples
/// ```
/// use pressroom_publisher::segment::is_title_marker;
///
/// assert!(is_title_marker("# Intro to Bees"));
/// assert!(is_title_marker("   # Indented heading  "));
/// assert!(!is_title_marker("## Sub heading"));
/// assert!(!is_title_marker("#hashtag"));
/// ```
#[must_use]
pub fn is_title_marker(text: &str) -> bool {
    text.trim().starts_with(TITLE_MARKER)
}

/// Extract the heading text from a single line, if the line is a title line.
#[must_use]
pub fn title_from_line(line: &str) -> Option<String> {
    let title = line.trim().strip_prefix(TITLE_MARKER)?.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Clean a content paragraph for inclusion in an article body.
///
/// - Strips a leading run of `#` so stray sub-heading marks don't leak into the body
/// - Trims surrounding whitespace and trailing whitespace per line
/// - Collapses interior runs of blank lines into a single blank line
///
/// Returns `None` when nothing is left.
///
/// # Examples
/// ```
/// use pressroom_publisher::segment::clean_content;
///
/// assert_eq!(clean_content("## Habitat").as_deref(), Some("Habitat"));
/// assert_eq!(clean_content("a\n\n\n\nb").as_deref(), Some("a\n\nb"));
/// assert_eq!(clean_content("###"), None);
/// ```
#[must_use]
pub fn clean_content(text: &str) -> Option<String> {
    let stripped = text.trim().trim_start_matches('#').trim();
    if stripped.is_empty() {
        return None;
    }

    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in stripped.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if !previous_blank {
                lines.push("");
            }
            previous_blank = true;
        } else {
            lines.push(line);
            previous_blank = false;
        }
    }

    Some(lines.join("\n"))
}
