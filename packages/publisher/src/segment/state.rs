//! Events and states of the segmentation state machine.

use super::text::{clean_content, is_blank, is_title_marker, title_from_line};
use crate::types::Article;

/// Classification of one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphEvent<'a> {
    /// Empty or whitespace-only paragraph.
    Blank,

    /// Paragraph starting with the `# ` marker.
    Marker(&'a str),

    /// Any other paragraph.
    Content(&'a str),
}

impl<'a> ParagraphEvent<'a> {
    /// Classify a raw paragraph.
    #[must_use]
    pub fn classify(text: &'a str) -> Self {
        if is_blank(text) {
            Self::Blank
        } else if is_title_marker(text) {
            Self::Marker(text)
        } else {
            Self::Content(text)
        }
    }
}

/// Article under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingArticle {
    title: String,
    body: Vec<String>,
    placeholder: bool,
}

impl PendingArticle {
    /// Open an article from a marker paragraph.
    ///
    /// The first line carrying the marker becomes the title. Every other
    /// line of the paragraph (a subtitle sharing the heading's paragraph,
    /// for instance) is cleaned and folded into the body. Without a usable
    /// heading line the placeholder title is used.
    #[must_use]
    pub fn from_marker(paragraph: &str, placeholder_title: &str) -> Self {
        let lines: Vec<&str> = paragraph.lines().collect();
        let heading = lines
            .iter()
            .enumerate()
            .find_map(|(idx, line)| title_from_line(line).map(|title| (idx, title)));

        let (title, title_idx, placeholder) = match heading {
            Some((idx, title)) => (title, Some(idx), false),
            None => (placeholder_title.to_string(), None, true),
        };

        let body = lines
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != title_idx)
            .filter_map(|(_, line)| clean_content(line))
            .collect();

        Self {
            title,
            body,
            placeholder,
        }
    }

    /// Open an untitled article, used for content ahead of the first marker.
    #[must_use]
    pub fn untitled(placeholder_title: &str) -> Self {
        Self {
            title: placeholder_title.to_string(),
            body: Vec::new(),
            placeholder: true,
        }
    }

    /// Append a content paragraph to the body.
    pub fn push_content(&mut self, paragraph: &str) {
        if let Some(cleaned) = clean_content(paragraph) {
            self.body.push(cleaned);
        }
    }

    /// Title of the article.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the title is the placeholder.
    #[must_use]
    pub fn has_placeholder_title(&self) -> bool {
        self.placeholder
    }

    /// Close the article under the given sequence number.
    #[must_use]
    pub fn finalize(self, sequence: usize) -> Article {
        Article::new(sequence, self.title, self.body)
    }
}

/// Segmenter state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SegmentState {
    /// No marker seen yet.
    #[default]
    NoOpenArticle,

    /// An article is being collected.
    ArticleOpen(PendingArticle),
}
