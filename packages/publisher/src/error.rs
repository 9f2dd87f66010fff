//! Error types for the publisher.
//!
//! Only hard failures live here. Malformed documents (missing or misplaced
//! title markers) degrade to warnings on the segmentation outcome instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the publisher library.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The document's XML part could not be parsed.
    #[error("Document XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The .docx container could not be opened.
    #[error("Invalid .docx container: {0}")]
    Docx(#[from] zip::result::ZipError),

    /// A required part is missing from the document container.
    #[error("Missing document part '{part}' in {}", .path.display())]
    MissingDocumentPart { part: String, path: PathBuf },

    /// The input file type has no reader.
    #[error("Unsupported document type: {}. Expected .docx, .md, .markdown or .txt", .0.display())]
    UnsupportedDocument(PathBuf),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Site configuration file could not be parsed.
    #[error("Invalid site configuration: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// Missing or invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Base URL is not an absolute http(s) URL.
    #[error("Invalid base URL: '{0}'. Expected an absolute http(s) URL (e.g., https://example.github.io/site)")]
    InvalidBaseUrl(String),

    /// Sitemap page size must be positive.
    #[error("Invalid sitemap page size: {0}. Expected a value greater than 0")]
    InvalidPageSize(usize),

    /// The generation API answered with a non-success status.
    #[error("Generation API error (status {status}): {message}")]
    GenerationApi { status: u16, message: String },

    /// The generation API answered with an unexpected body.
    #[error("Unexpected generation response: {0}")]
    MalformedResponse(String),

    /// The generation API returned no text.
    #[error("Generation API returned empty text")]
    EmptyGeneration,
}

/// Result type alias for publisher operations.
pub type Result<T> = std::result::Result<T, PublisherError>;
