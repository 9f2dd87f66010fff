//! Markdown rendering of articles and atomic file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Article;

/// Render an article as markdown.
///
/// The title is always re-emitted as a level-1 heading, followed by the
/// body paragraphs separated by exactly one blank line.
///
/// # Examples
/// ```
/// use pressroom_publisher::render::render_article;
/// use pressroom_publisher::types::Article;
///
/// let article = Article::new(1, "Intro to Bees", vec!["Bees are insects.".to_string()]);
/// assert_eq!(render_article(&article), "# Intro to Bees\n\nBees are insects.\n");
/// ```
#[must_use]
pub fn render_article(article: &Article) -> String {
    let mut content = format!("# {}\n", article.title);
    for paragraph in &article.body {
        content.push('\n');
        content.push_str(paragraph);
        content.push('\n');
    }
    content
}

/// Write a file atomically.
///
/// Writes to a hidden temp file next to the target, syncs it to disk and
/// renames it into place, so a crash never leaves a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save an article under `output_dir/file_name`.
///
/// # Returns
/// Path to the saved file
pub fn save_article(article: &Article, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    write_atomic(&path, &render_article(article))?;
    tracing::debug!(path = %path.display(), "Saved article");
    Ok(path)
}
