//! Pressroom Publisher - Static-content pipeline for a text publishing site.
//!
//! This crate splits a flat document into one markdown file per article,
//! drafts posts from a queue of topic titles through a text-generation API,
//! and builds the navigation index and sitemaps over the resulting files.
//!
//! # Example
//!
//! ```
//! use pressroom_publisher::segment::Segmenter;
//! use pressroom_publisher::slug::FileNameAssigner;
//!
//! let paragraphs = ["# Intro to Bees", "Bees are insects.", "# Intro to Ants"];
//! let outcome = Segmenter::default().segment(paragraphs);
//!
//! let mut names = FileNameAssigner::new();
//! let files: Vec<String> = outcome.articles.iter().map(|a| names.assign(a)).collect();
//! assert_eq!(files, ["0001-intro-to-bees.md", "0002-intro-to-ants.md"]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Defaults, site configuration and validation
//! - [`types`]: Core data types (Article, ContentRecord, NavigationIndex)
//! - [`error`]: Error types and Result alias
//! - [`document`]: .docx and text readers producing paragraph streams
//! - [`segment`]: Paragraph stream to articles state machine
//! - [`slug`]: Slugs and collision-free file names
//! - [`render`]: Markdown rendering and atomic writes
//! - [`extract`]: Document extraction service
//! - [`index`]: Navigation index builder
//! - [`sitemap`]: Paginated sitemap builder
//! - [`queue`]: Titles queue and generation log
//! - [`generate`]: Text-generation client and workflow
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod generate;
pub mod index;
pub mod queue;
pub mod render;
pub mod segment;
pub mod sitemap;
pub mod slug;
pub mod types;

// Re-export main functions
pub use extract::{extract_document, extract_paragraphs, ExtractOptions, ExtractReport};
pub use generate::{generate_next, TextGenerator};
pub use index::update_index;
pub use sitemap::{generate_sitemaps, SitemapOptions};

// Re-export commonly used items
pub use error::{PublisherError, Result};
pub use segment::{Segmentation, Segmenter};
pub use slug::FileNameAssigner;
pub use types::{Article, ContentRecord, NavigationIndex};
