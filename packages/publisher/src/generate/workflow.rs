use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;
use crate::generate::client::TextGenerator;
use crate::generate::prompt::build_article_prompt;
use crate::index::list_content_files;
use crate::queue::{GenerationLog, TitleQueue};
use crate::render::write_atomic;
use crate::slug::FileNameAssigner;

/// A post drafted from the head of the titles queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    /// Title taken from the queue.
    pub title: String,

    /// File name inside the posts directory.
    pub file_name: String,

    /// Full path of the written post.
    pub path: PathBuf,
}

/// Draft a post for the first queued title.
///
/// # Returns
/// `Ok(None)` when the queue is empty. On a generation or write failure the
/// queue file is left as it was and the error is returned, so the title is
/// retried by the next run.
pub fn generate_next<G>(
    queue: &TitleQueue,
    generator: &G,
    posts_dir: &Path,
    log: &GenerationLog,
) -> Result<Option<GeneratedPost>>
where
    G: TextGenerator + ?Sized,
{
    let outcome = queue.process_next(|title| {
        tracing::info!(title = %title, "Generating post");
        let content = generator
            .generate(&build_article_prompt(title))
            .inspect_err(|e| {
                tracing::warn!(title = %title, error = %e, "Generation failed, title stays queued");
            })?;
        write_post(title, &content, posts_dir, log)
    })?;

    Ok(outcome.map(|(_, post)| post))
}

fn write_post(
    title: &str,
    content: &str,
    posts_dir: &Path,
    log: &GenerationLog,
) -> Result<GeneratedPost> {
    fs::create_dir_all(posts_dir)?;

    let mut assigner = FileNameAssigner::with_existing(list_content_files(posts_dir)?);
    let file_name = assigner.assign_unprefixed(title);
    let path = posts_dir.join(&file_name);

    let mut markdown = content.trim_end().to_string();
    markdown.push('\n');
    write_atomic(&path, &markdown)?;
    tracing::info!(path = %path.display(), "Saved generated post");

    log.record(title, &file_name, Local::now())?;

    Ok(GeneratedPost {
        title: title.to_string(),
        file_name,
        path,
    })
}
