//! Pending-titles queue and generation log.
//!
//! The queue is a plain text file with one title per line; line order is
//! priority order. A title only leaves the queue after its post has been
//! written, so a failed generation keeps it for the next run.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{PublisherError, Result};
use crate::render::write_atomic;

/// File-backed queue of titles awaiting generation.
#[derive(Debug, Clone)]
pub struct TitleQueue {
    path: PathBuf,
}

impl TitleQueue {
    /// Queue stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the queue file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all pending titles, skipping blank lines.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Err(PublisherError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Titles file not found: {}", self.path.display()),
            )));
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Highest-priority title, if any.
    pub fn peek(&self) -> Result<Option<String>> {
        Ok(self.load()?.into_iter().next())
    }

    /// Overwrite the queue with `titles`, one per line.
    pub fn save(&self, titles: &[String]) -> Result<()> {
        let mut content = titles.join("\n");
        if !titles.is_empty() {
            content.push('\n');
        }
        write_atomic(&self.path, &content)
    }

    /// Run `process` on the first title and pop it only on success.
    ///
    /// Returns `Ok(None)` for an empty queue. When `process` fails the
    /// queue file is not touched and the error is returned.
    pub fn process_next<T, F>(&self, process: F) -> Result<Option<(String, T)>>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let mut titles = self.load()?;
        if titles.is_empty() {
            return Ok(None);
        }

        let title = titles.remove(0);
        let output = process(&title)?;

        self.save(&titles)?;
        tracing::info!(remaining = titles.len(), "Titles queue updated");
        Ok(Some((title, output)))
    }
}

/// Append-only log of generated posts.
#[derive(Debug, Clone)]
pub struct GenerationLog {
    path: PathBuf,
}

impl GenerationLog {
    /// Log stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Format one log line.
    #[must_use]
    pub fn format_entry(title: &str, file_name: &str, at: DateTime<Local>) -> String {
        format!(
            "{} - GENERATED: {title} -> {file_name}\n",
            at.format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// Append an entry for a generated post.
    pub fn record(&self, title: &str, file_name: &str, at: DateTime<Local>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(Self::format_entry(title, file_name, at).as_bytes())?;
        Ok(())
    }
}
