//! Extraction service: document → articles → markdown files.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::document::read_paragraphs;
use crate::error::Result;
use crate::render::save_article;
use crate::segment::{SegmentPolicy, Segmenter};
use crate::slug::FileNameAssigner;
use crate::types::ContentRecord;

/// Marker file that keeps an otherwise empty posts directory under version control.
const GITKEEP: &str = ".gitkeep";

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Segmentation policy.
    pub policy: SegmentPolicy,
}

/// One article written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Sequence number within the document.
    pub sequence: usize,

    /// Index record (file name and article title).
    pub record: ContentRecord,

    /// Full path of the written file.
    pub path: PathBuf,
}

/// Summary of an extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Articles written, in sequence order.
    pub articles: Vec<ExtractedArticle>,

    /// Non-fatal issues (placeholder titles, discarded leading content).
    pub warnings: Vec<String>,

    /// Paragraphs dropped ahead of the first title marker.
    pub discarded_paragraphs: usize,
}

impl ExtractReport {
    /// Number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Read a document and write one markdown file per article.
///
/// # Arguments
/// * `input` - Document to read (.docx, .md, .markdown or .txt)
/// * `output_dir` - Directory for the article files (created when missing)
/// * `options` - Segmentation options
///
/// # Returns
/// Report with the written files and any warnings
pub fn extract_document(
    input: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let paragraphs = read_paragraphs(input)?;
    tracing::info!(
        input = %input.display(),
        paragraphs = paragraphs.len(),
        "Loaded document"
    );
    extract_paragraphs(&paragraphs, output_dir, options)
}

/// Segment an in-memory paragraph stream and write the articles.
///
/// The whole stream is segmented before the first file is written. An IO
/// error stops the run; files written before it stay intact.
pub fn extract_paragraphs<S: AsRef<str>>(
    paragraphs: &[S],
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let segmentation = Segmenter::new(options.policy.clone()).segment(paragraphs);

    prepare_output_dir(output_dir)?;

    let mut assigner = FileNameAssigner::new();
    let mut articles = Vec::with_capacity(segmentation.articles.len());

    for article in &segmentation.articles {
        let file_name = assigner.assign(article);
        let path = save_article(article, output_dir, &file_name)?;
        articles.push(ExtractedArticle {
            sequence: article.sequence,
            record: ContentRecord::new(file_name, article.title.clone()),
            path,
        });
    }

    tracing::info!(
        articles = articles.len(),
        warnings = segmentation.warnings.len(),
        "Extraction complete"
    );

    Ok(ExtractReport {
        articles,
        warnings: segmentation.warnings,
        discarded_paragraphs: segmentation.discarded_paragraphs,
    })
}

/// Create the output directory and its `.gitkeep` marker.
fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_dir.join(GITKEEP))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_extract_paragraphs_writes_files() {
        let dir = tempdir().unwrap();
        let posts = dir.path().join("posts");
        let paragraphs = [
            "# Intro to Bees",
            "Bees are insects.",
            "",
            "# Intro to Ants",
            "Ants are insects too.",
        ];

        let report = extract_paragraphs(&paragraphs, &posts, &ExtractOptions::default()).unwrap();

        let names: Vec<&str> = report
            .articles
            .iter()
            .map(|a| a.record.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["0001-intro-to-bees.md", "0002-intro-to-ants.md"]);
        assert_eq!(
            fs::read_to_string(posts.join("0002-intro-to-ants.md")).unwrap(),
            "# Intro to Ants\n\nAnts are insects too.\n"
        );
        assert!(posts.join(".gitkeep").exists());
    }

    #[test]
    fn test_extract_paragraphs_without_markers_writes_nothing() {
        let dir = tempdir().unwrap();
        let report =
            extract_paragraphs(&["no heading here"], dir.path(), &ExtractOptions::default())
                .unwrap();

        assert!(report.articles.is_empty());
        assert_eq!(report.discarded_paragraphs, 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_extract_document_markdown() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("book.md");
        fs::write(&input, "# Bees\nA primer\n\nBees are insects.\n\n# Ants\n").unwrap();

        let report =
            extract_document(&input, &dir.path().join("out"), &ExtractOptions::default()).unwrap();

        assert_eq!(report.articles.len(), 2);
        assert_eq!(
            fs::read_to_string(&report.articles[0].path).unwrap(),
            "# Bees\n\nA primer\n\nBees are insects.\n"
        );
        assert_eq!(fs::read_to_string(&report.articles[1].path).unwrap(), "# Ants\n");
    }
}
