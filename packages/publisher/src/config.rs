//! Configuration constants, validation functions and the site config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{PublisherError, Result};

/// Directory holding one markdown file per article.
pub const DEFAULT_POSTS_DIR: &str = "posts";

/// Queue of pending titles for the generation workflow, one per line.
pub const DEFAULT_TITLES_FILE: &str = "titles.txt";

/// Append-only log of generated posts.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Navigation index consumed by the site sidebar.
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// Top-level sitemap manifest listing every sitemap page.
pub const SITEMAP_INDEX_FILE: &str = "sitemap_index.xml";

/// Base name of sitemap pages (`sitemap_1.xml`, `sitemap_2.xml`, ...).
pub const SITEMAP_BASE_NAME: &str = "sitemap";

/// Maximum number of URLs in one sitemap page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Maximum slug length in characters, keeps file names portable.
pub const SLUG_MAX_LENGTH: usize = 50;

/// Width of the zero-padded sequence prefix in extracted file names.
pub const SEQUENCE_WIDTH: usize = 4;

/// Title used when a marker paragraph has no usable heading line.
pub const UNTITLED_ARTICLE: &str = "Untitled Article";

/// Default site config file, read when present in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pressroom.yaml";

/// Default site base URL used in sitemaps.
pub const DEFAULT_BASE_URL: &str = "https://example.github.io/site";

/// HTTP timeout in seconds.
///
/// Generation with `wait_for_model` can take a while on a cold model.
pub const HTTP_TIMEOUT_SECS: u64 = 120;

/// Default Hugging Face inference endpoint for article drafts.
pub const DEFAULT_GENERATION_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

/// Validate and normalize a site base URL.
///
/// Returns the URL without trailing slash so paths can be appended with `/`.
///
/// # Examples
/// ```
/// use pressroom_publisher::config::validate_base_url;
///
/// assert_eq!(
///     validate_base_url("https://example.github.io/site/").unwrap(),
///     "https://example.github.io/site"
/// );
/// assert!(validate_base_url("not a url").is_err());
/// ```
pub fn validate_base_url(base_url: &str) -> Result<String> {
    let parsed =
        Url::parse(base_url).map_err(|_| PublisherError::InvalidBaseUrl(base_url.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(PublisherError::InvalidBaseUrl(base_url.to_string()));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Validate a sitemap page size.
pub fn validate_page_size(page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(PublisherError::InvalidPageSize(page_size));
    }
    Ok(page_size)
}

/// Public URL of a post, given its file stem (`0001-intro-to-bees`).
///
/// The stem is percent-encoded as a path segment; slugs may keep
/// non-Latin letters.
pub fn post_url(base_url: &str, stem: &str) -> Result<String> {
    let invalid = || PublisherError::InvalidBaseUrl(base_url.to_string());
    let mut url = Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .extend(["posts", stem, ""]);
    Ok(url.to_string())
}

/// Public URL of a sitemap page.
pub fn sitemap_url(base_url: &str, page_name: &str) -> String {
    format!("{base_url}/{page_name}")
}

/// Site settings read from `pressroom.yaml`.
///
/// Every field is optional in the file; CLI flags override file values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site URL used for sitemap locations.
    pub base_url: String,

    /// Directory with the article markdown files.
    pub posts_dir: PathBuf,

    /// Directory receiving `index.json` and the sitemaps.
    pub output_dir: PathBuf,

    /// Maximum URLs per sitemap page.
    pub page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            posts_dir: PathBuf::from(DEFAULT_POSTS_DIR),
            output_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SiteConfig {
    /// Parse a site config from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        validate_page_size(config.page_size)?;
        Ok(config)
    }

    /// Load the site config from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No site config, using defaults");
            return Ok(Self::default());
        }
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }
}
