//! Paginated sitemaps and the sitemap index.
//!
//! Post URLs are split into pages of at most `page_size` entries
//! (`sitemap_1.xml`, `sitemap_2.xml`, ...) and a top-level
//! `sitemap_index.xml` enumerates the pages.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{
    post_url, sitemap_url, validate_base_url, validate_page_size, SITEMAP_BASE_NAME,
    SITEMAP_INDEX_FILE,
};
use crate::error::Result;
use crate::index::list_content_files;
use crate::render::write_atomic;
use crate::slug::CONTENT_EXTENSION;
use crate::types::SitemapPage;

/// XML namespace of the sitemaps.org protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const CHANGE_FREQUENCY: &str = "weekly";
const PRIORITY: &str = "0.8";

/// Validated sitemap settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapOptions {
    base_url: String,
    page_size: usize,
}

impl SitemapOptions {
    /// Validate and create sitemap options.
    pub fn new(base_url: &str, page_size: usize) -> Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url)?,
            page_size: validate_page_size(page_size)?,
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Maximum URLs per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Files written by a sitemap run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapReport {
    /// Paths of the page files.
    pub pages: Vec<PathBuf>,

    /// Path of the index file, absent when there was nothing to list.
    pub index: Option<PathBuf>,

    /// Total number of URLs across pages.
    pub url_count: usize,
}

/// Split content file names into sitemap pages.
///
/// # Examples
/// ```
/// use pressroom_publisher::sitemap::{paginate, SitemapOptions};
///
/// let options = SitemapOptions::new("https://example.github.io/site", 2).unwrap();
/// let pages = paginate(&["0001-a.md", "0002-b.md", "0003-c.md"], &options).unwrap();
///
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].name, "sitemap_2.xml");
/// assert_eq!(pages[1].urls, vec!["https://example.github.io/site/posts/0003-c/"]);
/// ```
pub fn paginate<S: AsRef<str>>(
    file_names: &[S],
    options: &SitemapOptions,
) -> Result<Vec<SitemapPage>> {
    let suffix = format!(".{CONTENT_EXTENSION}");

    file_names
        .chunks(options.page_size)
        .enumerate()
        .map(|(idx, chunk)| {
            let urls = chunk
                .iter()
                .map(|name| {
                    let name = name.as_ref();
                    let stem = name.strip_suffix(suffix.as_str()).unwrap_or(name);
                    post_url(&options.base_url, stem)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(SitemapPage {
                name: format!("{SITEMAP_BASE_NAME}_{}.xml", idx + 1),
                urls,
            })
        })
        .collect()
}

/// Sitemap timestamp format: W3C datetime with seconds precision.
#[must_use]
pub fn format_lastmod(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn new_writer() -> Result<Writer<Cursor<Vec<u8>>>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn start_root(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str) -> Result<()> {
    let mut root = BytesStart::new(tag);
    root.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    Ok(())
}

/// Write `<tag>text</tag>`; `BytesText` escapes XML entities.
fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> String {
    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8_lossy(&bytes).into_owned();
    xml.push('\n');
    xml
}

/// Render one `<urlset>` page.
pub fn render_urlset(page: &SitemapPage, lastmod: &str) -> Result<String> {
    let mut writer = new_writer()?;
    start_root(&mut writer, "urlset")?;

    for url in &page.urls {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", url)?;
        write_text_element(&mut writer, "lastmod", lastmod)?;
        write_text_element(&mut writer, "changefreq", CHANGE_FREQUENCY)?;
        write_text_element(&mut writer, "priority", PRIORITY)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(finish(writer))
}

/// Render the `<sitemapindex>` listing every page.
pub fn render_sitemap_index(
    pages: &[SitemapPage],
    options: &SitemapOptions,
    lastmod: &str,
) -> Result<String> {
    let mut writer = new_writer()?;
    start_root(&mut writer, "sitemapindex")?;

    for page in pages {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", &sitemap_url(&options.base_url, &page.name))?;
        write_text_element(&mut writer, "lastmod", lastmod)?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
    Ok(finish(writer))
}

/// Write all sitemap pages plus the index into `output_dir`.
///
/// With no content files nothing is written.
pub fn write_sitemaps<S: AsRef<str>>(
    file_names: &[S],
    options: &SitemapOptions,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> Result<SitemapReport> {
    if file_names.is_empty() {
        tracing::info!("No articles found, skipping sitemap generation");
        return Ok(SitemapReport::default());
    }

    let lastmod = format_lastmod(now);
    let pages = paginate(file_names, options)?;
    let mut report = SitemapReport::default();

    for page in &pages {
        let path = output_dir.join(&page.name);
        write_atomic(&path, &render_urlset(page, &lastmod)?)?;
        tracing::debug!(page = %page.name, urls = page.urls.len(), "Wrote sitemap page");
        report.url_count += page.urls.len();
        report.pages.push(path);
    }

    let index_path = output_dir.join(SITEMAP_INDEX_FILE);
    write_atomic(&index_path, &render_sitemap_index(&pages, options, &lastmod)?)?;
    report.index = Some(index_path);

    tracing::info!(
        pages = report.pages.len(),
        urls = report.url_count,
        "Sitemap generation complete"
    );
    Ok(report)
}

/// Build sitemaps for every post in `posts_dir`.
pub fn generate_sitemaps(
    posts_dir: &Path,
    output_dir: &Path,
    options: &SitemapOptions,
) -> Result<SitemapReport> {
    let file_names = list_content_files(posts_dir)?;
    write_sitemaps(&file_names, options, output_dir, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn options(page_size: usize) -> SitemapOptions {
        SitemapOptions::new("https://example.github.io/site/", page_size).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_options_validation() {
        assert!(SitemapOptions::new("https://example.org", 0).is_err());
        assert!(SitemapOptions::new("example.org", 10).is_err());
        assert_eq!(options(10).base_url(), "https://example.github.io/site");
    }

    #[test]
    fn test_paginate_1500_files() {
        let names: Vec<String> = (1..=1500).map(|i| format!("{i:04}-post.md")).collect();
        let pages = paginate(&names, &options(1000)).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].urls.len(), 1000);
        assert_eq!(pages[1].urls.len(), 500);
        assert_eq!(pages[0].name, "sitemap_1.xml");
        assert_eq!(
            pages[1].urls[0],
            "https://example.github.io/site/posts/1001-post/"
        );
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let names: Vec<String> = (1..=4).map(|i| format!("{i}.md")).collect();
        assert_eq!(paginate(&names, &options(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_paginate_non_latin_slug_is_percent_encoded() {
        let options = SitemapOptions::new("https://example.org", 10).unwrap();
        // "History of bees" in Arabic
        let title = "\u{62a}\u{627}\u{631}\u{64a}\u{62e} \u{627}\u{644}\u{646}\u{62d}\u{644}";
        let stem = crate::slug::sequenced_stem(1, title);
        let pages = paginate(&[format!("{stem}.md")], &options).unwrap();

        let loc = &pages[0].urls[0];
        assert!(loc.is_ascii(), "loc not ASCII: {loc}");
        assert!(loc.starts_with("https://example.org/posts/0001-%D8%AA"));
        assert!(loc.ends_with("/"));
        let parsed = url::Url::parse(loc).unwrap();
        assert_eq!(parsed.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_format_lastmod() {
        assert_eq!(format_lastmod(fixed_time()), "2025-01-01T12:00:00+00:00");
    }

    #[test]
    fn test_render_urlset() {
        let page = SitemapPage {
            name: "sitemap_1.xml".to_string(),
            urls: vec!["https://example.org/posts/0001-a/".to_string()],
        };
        let xml = render_urlset(&page, "2025-01-01T12:00:00+00:00").unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             \x20 <url>\n\
             \x20   <loc>https://example.org/posts/0001-a/</loc>\n\
             \x20   <lastmod>2025-01-01T12:00:00+00:00</lastmod>\n\
             \x20   <changefreq>weekly</changefreq>\n\
             \x20   <priority>0.8</priority>\n\
             \x20 </url>\n\
             </urlset>\n"
        );
    }

    #[test]
    fn test_render_urlset_escapes() {
        let page = SitemapPage {
            name: "sitemap_1.xml".to_string(),
            urls: vec!["https://example.org/posts/a&b/".to_string()],
        };
        let xml = render_urlset(&page, "x").unwrap();
        assert!(xml.contains("<loc>https://example.org/posts/a&amp;b/</loc>"));
    }

    #[test]
    fn test_render_sitemap_index() {
        let pages = paginate(&["a.md", "b.md", "c.md"], &options(2)).unwrap();
        let xml = render_sitemap_index(&pages, &options(2), "t").unwrap();

        assert!(xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://example.github.io/site/sitemap_1.xml</loc>"));
        assert!(xml.contains("<loc>https://example.github.io/site/sitemap_2.xml</loc>"));
        assert_eq!(xml.matches("<sitemap>").count(), 2);
    }

    #[test]
    fn test_write_sitemaps() {
        let dir = tempdir().unwrap();
        let names: Vec<String> = (1..=1500).map(|i| format!("{i:04}-post.md")).collect();

        let report = write_sitemaps(&names, &options(1000), dir.path(), fixed_time()).unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.url_count, 1500);
        let index = fs::read_to_string(report.index.unwrap()).unwrap();
        assert_eq!(index.matches("<sitemap>").count(), 2);
        let second = fs::read_to_string(dir.path().join("sitemap_2.xml")).unwrap();
        assert_eq!(second.matches("<url>").count(), 500);
    }

    #[test]
    fn test_write_sitemaps_empty() {
        let dir = tempdir().unwrap();
        let names: Vec<String> = Vec::new();
        let report = write_sitemaps(&names, &options(1000), dir.path(), fixed_time()).unwrap();

        assert_eq!(report, SitemapReport::default());
        assert!(!dir.path().join("sitemap_index.xml").exists());
    }
}
