//! Policy knobs for the degraded-input paths of the segmenter.

use crate::config::UNTITLED_ARTICLE;

/// What to do with content paragraphs that appear before the first title marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadingContent {
    /// Drop them. Documents are expected to open with a title marker.
    #[default]
    Discard,

    /// Collect them into an article titled with the placeholder title.
    Preamble,
}

/// Segmentation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPolicy {
    /// Handling of content before the first marker.
    pub leading_content: LeadingContent,

    /// Title used when a marker paragraph has no usable heading line.
    pub placeholder_title: String,
}

impl Default for SegmentPolicy {
    fn default() -> Self {
        Self {
            leading_content: LeadingContent::default(),
            placeholder_title: UNTITLED_ARTICLE.to_string(),
        }
    }
}

impl SegmentPolicy {
    /// Set the leading-content handling.
    #[must_use]
    pub fn with_leading_content(mut self, leading_content: LeadingContent) -> Self {
        self.leading_content = leading_content;
        self
    }

    /// Set the placeholder title.
    #[must_use]
    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.placeholder_title = title.into();
        self
    }
}
