//! Slugs and collision-free file names for articles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::{SEQUENCE_WIDTH, SLUG_MAX_LENGTH};
use crate::types::Article;

/// Runs of anything that is not a letter or digit.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Slug used when a title has no letters or digits at all.
const EMPTY_SLUG: &str = "untitled";

/// Extension of every content file.
pub const CONTENT_EXTENSION: &str = "md";

/// Generate a URL- and filesystem-safe slug from a title.
///
/// Accents are folded (NFKD, combining marks dropped), text is lowercased,
/// runs of non-alphanumerics become a single hyphen and the result is cut
/// to `max_length` characters without leading or trailing hyphens.
///
/// # Examples
/// ```
/// use pressroom_publisher::slug::slugify;
///
/// assert_eq!(slugify("Intro to Bees", 50), "intro-to-bees");
/// assert_eq!(slugify("  Café -- Déjà vu!  ", 50), "cafe-deja-vu");
/// assert_eq!(slugify("The Future of DAOs", 10), "the-future");
/// ```
#[must_use]
pub fn slugify(text: &str, max_length: usize) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let hyphenated = SLUG_SEPARATOR.replace_all(&folded, "-");
    let truncated: String = hyphenated
        .trim_matches('-')
        .chars()
        .take(max_length)
        .collect();

    truncated.trim_end_matches('-').to_string()
}

/// File stem for an extracted article: zero-padded sequence, hyphen, slug.
///
/// # Examples
/// ```
/// use pressroom_publisher::slug::sequenced_stem;
///
/// assert_eq!(sequenced_stem(1, "Intro to Bees"), "0001-intro-to-bees");
/// assert_eq!(sequenced_stem(12345, "Overflow"), "12345-overflow");
/// ```
#[must_use]
pub fn sequenced_stem(sequence: usize, title: &str) -> String {
    format!(
        "{sequence:0width$}-{slug}",
        width = SEQUENCE_WIDTH,
        slug = title_slug(title)
    )
}

/// Slug of a title with the empty-slug fallback applied.
#[must_use]
pub fn title_slug(title: &str) -> String {
    let slug = slugify(title, SLUG_MAX_LENGTH);
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Assigns unique file names within one run.
///
/// The sequence prefix already makes extracted names unique. The table of
/// issued names still guards names built without it (generated posts) and
/// any caller that reuses sequence numbers: a repeated stem gets `-2`,
/// `-3`, ... appended, deterministically in call order.
#[derive(Debug, Clone, Default)]
pub struct FileNameAssigner {
    issued: HashSet<String>,
}

impl FileNameAssigner {
    /// Create an assigner with an empty collision table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assigner that treats the given file names as taken.
    #[must_use]
    pub fn with_existing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let issued = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                name.strip_suffix(&format!(".{CONTENT_EXTENSION}"))
                    .unwrap_or(name)
                    .to_string()
            })
            .collect();
        Self { issued }
    }

    /// File name for an extracted article (`0001-intro-to-bees.md`).
    pub fn assign(&mut self, article: &Article) -> String {
        let stem = sequenced_stem(article.sequence, &article.title);
        self.claim(stem)
    }

    /// File name for a title without sequence prefix (`intro-to-bees.md`).
    pub fn assign_unprefixed(&mut self, title: &str) -> String {
        self.claim(title_slug(title))
    }

    /// Number of names issued or pre-registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether no names are taken yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn claim(&mut self, stem: String) -> String {
        let mut candidate = stem.clone();
        let mut count = 1;
        while self.issued.contains(&candidate) {
            count += 1;
            candidate = format!("{stem}-{count}");
        }
        if count > 1 {
            tracing::debug!(stem = %stem, file = %candidate, "Resolved file name collision");
        }
        self.issued.insert(candidate.clone());
        format!("{candidate}.{CONTENT_EXTENSION}")
    }
}
