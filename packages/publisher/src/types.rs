//! Core data types for the publisher.

use serde::{Deserialize, Serialize};

/// A single article reconstructed from a paragraph stream.
///
/// Finalized articles are immutable; the segmenter hands them out in
/// encounter order with contiguous sequence numbers starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// 1-based position among all articles of one document.
    pub sequence: usize,

    /// Heading text without the `# ` marker.
    pub title: String,

    /// Cleaned body paragraphs, excluding the title line.
    pub body: Vec<String>,
}

impl Article {
    /// Create a new article.
    #[must_use]
    pub fn new(sequence: usize, title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            sequence,
            title: title.into(),
            body,
        }
    }

    /// Whether the article consists of its title line only.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// One emitted content file, as listed in the navigation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Human-readable title.
    pub title: String,

    /// File name relative to the posts directory (e.g., `0001-intro-to-bees.md`).
    pub file_name: String,

    /// Last modification time in RFC 3339 format.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_modified: Option<String>,
}

impl ContentRecord {
    /// Create a record without modification time.
    #[must_use]
    pub fn new(file_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            last_modified: None,
        }
    }

    /// Attach a modification time.
    #[must_use]
    pub fn with_last_modified(mut self, last_modified: impl Into<String>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }
}

/// Navigation manifest written to `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIndex {
    /// Time the index was built, RFC 3339.
    pub updated_at: String,

    /// One record per content file, sorted by file name.
    pub articles: Vec<ContentRecord>,
}

/// One page of the paginated sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapPage {
    /// File name of the page (e.g., `sitemap_1.xml`).
    pub name: String,

    /// Absolute post URLs on this page.
    pub urls: Vec<String>,
}
