//! Navigation index (`index.json`) over the content files.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

use crate::config::SEQUENCE_WIDTH;
use crate::error::Result;
use crate::render::write_atomic;
use crate::slug::CONTENT_EXTENSION;
use crate::types::{ContentRecord, NavigationIndex};

/// Zero-padded sequence prefix of extracted file names (`0004-`).
///
/// Shorter digit runs are never a sequence prefix, so generated names such
/// as `10-tips-for-remote-work.md` keep their number.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEQUENCE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\d{{{SEQUENCE_WIDTH},}}-")).expect("valid regex")
});

/// Reconstruct a readable title from a content file name.
///
/// Reverses the slug transform as far as possible: drops the extension and
/// the numeric prefix, turns hyphens into spaces and capitalizes each word.
/// Names that are not markdown files are returned unchanged.
///
/// # Examples
/// ```
/// use pressroom_publisher::index::title_from_file_name;
///
/// assert_eq!(title_from_file_name("0004-the-future-of-daos.md"), "The Future Of Daos");
/// assert_eq!(title_from_file_name("intro-to-bees.md"), "Intro To Bees");
/// assert_eq!(title_from_file_name("notes.txt"), "notes.txt");
/// ```
#[must_use]
pub fn title_from_file_name(file_name: &str) -> String {
    let Some(stem) = file_name.strip_suffix(&format!(".{CONTENT_EXTENSION}")) else {
        return file_name.to_string();
    };

    let stem = SEQUENCE_PREFIX.replace(stem, "");
    stem.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// List markdown file names in a directory, sorted.
///
/// A missing directory yields an empty list.
pub fn list_content_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "Posts directory not found, treating as empty");
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext == CONTENT_EXTENSION)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Build navigation records from file names alone.
#[must_use]
pub fn records_from_file_names<S: AsRef<str>>(file_names: &[S]) -> Vec<ContentRecord> {
    file_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            ContentRecord::new(name, title_from_file_name(name))
        })
        .collect()
}

/// Scan a posts directory into records carrying modification times.
pub fn scan_posts(dir: &Path) -> Result<Vec<ContentRecord>> {
    let names = list_content_files(dir)?;
    let mut records = Vec::with_capacity(names.len());

    for record in records_from_file_names(&names) {
        let modified = fs::metadata(dir.join(&record.file_name))?.modified()?;
        let modified: DateTime<Local> = modified.into();
        records.push(record.with_last_modified(modified.to_rfc3339()));
    }

    tracing::info!(dir = %dir.display(), articles = records.len(), "Scanned posts");
    Ok(records)
}

/// Assemble the navigation index.
#[must_use]
pub fn build_index(articles: Vec<ContentRecord>, updated_at: DateTime<Local>) -> NavigationIndex {
    NavigationIndex {
        updated_at: updated_at.to_rfc3339(),
        articles,
    }
}

/// Write the navigation index as pretty JSON.
pub fn write_index(index: &NavigationIndex, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(index)?;
    json.push('\n');
    write_atomic(path, &json)
}

/// Rebuild `index.json` from the posts directory.
pub fn update_index(posts_dir: &Path, index_path: &Path) -> Result<NavigationIndex> {
    let index = build_index(scan_posts(posts_dir)?, Local::now());
    write_index(&index, index_path)?;
    Ok(index)
}
