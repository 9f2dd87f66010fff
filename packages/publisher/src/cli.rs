//! Command-line interface for the publisher.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    SiteConfig, DEFAULT_CONFIG_FILE, DEFAULT_INDEX_FILE, DEFAULT_LOG_FILE, DEFAULT_TITLES_FILE,
};
use crate::error::{PublisherError, Result};
use crate::extract::{extract_document, ExtractOptions};
use crate::generate::{generate_next, GenerationConfig, HuggingFaceClient};
use crate::index::update_index;
use crate::queue::{GenerationLog, TitleQueue};
use crate::segment::{LeadingContent, SegmentPolicy};
use crate::sitemap::{generate_sitemaps, SitemapOptions};

/// Pressroom - Split documents into articles, draft posts and build site manifests.
#[derive(Parser)]
#[command(name = "pressroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site configuration file (default: pressroom.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a document into one markdown file per article.
    Extract {
        /// Document to split (.docx, .md, .markdown or .txt)
        document: PathBuf,

        /// Output directory (default: posts directory from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep paragraphs before the first title as an untitled article
        #[arg(long)]
        keep_leading_content: bool,

        /// Title used when an article has no heading line
        #[arg(long)]
        placeholder_title: Option<String>,
    },

    /// Draft a post for the next title in the queue.
    Generate {
        /// Titles queue file (default: titles.txt)
        #[arg(short, long)]
        queue: Option<PathBuf>,

        /// Output directory (default: posts directory from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generation log file (default: log.txt)
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Rebuild the navigation index (index.json).
    Index {
        /// Posts directory (default: from config)
        #[arg(short, long)]
        posts: Option<PathBuf>,

        /// Index file (default: index.json in the output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build paginated sitemaps and the sitemap index.
    Sitemap {
        /// Posts directory (default: from config)
        #[arg(short, long)]
        posts: Option<PathBuf>,

        /// Output directory (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Absolute site URL (e.g., https://example.github.io/site)
        #[arg(short, long, env = "SITE_BASE_URL")]
        base_url: Option<String>,

        /// Maximum URLs per sitemap file
        #[arg(long)]
        page_size: Option<usize>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let site = load_site_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            document,
            output,
            keep_leading_content,
            placeholder_title,
        } => {
            let mut policy = SegmentPolicy::default();
            if keep_leading_content {
                policy = policy.with_leading_content(LeadingContent::Preamble);
            }
            if let Some(title) = placeholder_title {
                policy = policy.with_placeholder_title(title);
            }
            let output = output.unwrap_or_else(|| site.posts_dir.clone());
            extract_command(&document, &output, ExtractOptions { policy })
        }
        Commands::Generate { queue, output, log } => generate_command(
            &queue.unwrap_or_else(|| PathBuf::from(DEFAULT_TITLES_FILE)),
            &output.unwrap_or_else(|| site.posts_dir.clone()),
            &log.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        ),
        Commands::Index { posts, output } => index_command(
            &posts.unwrap_or_else(|| site.posts_dir.clone()),
            &output.unwrap_or_else(|| site.output_dir.join(DEFAULT_INDEX_FILE)),
        ),
        Commands::Sitemap {
            posts,
            output,
            base_url,
            page_size,
        } => {
            let options = SitemapOptions::new(
                base_url.as_deref().unwrap_or(&site.base_url),
                page_size.unwrap_or(site.page_size),
            )?;
            sitemap_command(
                &posts.unwrap_or_else(|| site.posts_dir.clone()),
                &output.unwrap_or_else(|| site.output_dir.clone()),
                &options,
            )
        }
    }
}

/// Load the site config; an explicitly named file must exist.
fn load_site_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) if !path.exists() => Err(PublisherError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Config file does not exist: {}", path.display()),
        ))),
        Some(path) => SiteConfig::load(path),
        None => SiteConfig::load(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the extract command.
fn extract_command(document: &Path, output: &Path, options: ExtractOptions) -> Result<()> {
    if !document.exists() {
        return Err(PublisherError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Document does not exist: {}", document.display()),
        )));
    }

    println!(
        "{} {}",
        style("Extracting").bold(),
        style(document.display()).cyan()
    );
    println!();

    let report = extract_document(document, output, &options)?;

    for article in &report.articles {
        println!(
            "  {} {}",
            style(&article.record.file_name).green(),
            article.record.title
        );
    }
    if report.articles.is_empty() {
        println!("  {}", style("No articles found").yellow());
    }
    for warning in &report.warnings {
        println!("  {} {warning}", style("Warning:").yellow().bold());
    }

    println!();
    println!(
        "{} {} article(s) to {}",
        style("Saved").green().bold(),
        report.articles.len(),
        output.display()
    );

    Ok(())
}

/// Execute the generate command.
fn generate_command(queue_path: &Path, output: &Path, log_path: &Path) -> Result<()> {
    let queue = TitleQueue::new(queue_path);

    let Some(title) = queue.peek()? else {
        println!("{}", style("Titles queue is empty, nothing to generate").yellow());
        return Ok(());
    };

    // Only require credentials once there is work to do
    let config = GenerationConfig::from_env()?;
    let client = HuggingFaceClient::new(&config)?;
    let log = GenerationLog::new(log_path);

    println!("{} {}", style("Generating").bold(), style(&title).cyan());

    let pb = spinner("Waiting for the generation API...");
    let post = match generate_next(&queue, &client, output, &log) {
        Ok(post) => post,
        Err(e) => {
            pb.finish_and_clear();
            println!(
                "{} Title remains in queue: {}",
                style("Failed.").red().bold(),
                title
            );
            return Err(e);
        }
    };
    pb.finish_and_clear();

    if let Some(post) = post {
        println!(
            "{} {}",
            style("Saved to:").green().bold(),
            post.path.display()
        );
        println!("  Titles remaining: {}", queue.load()?.len());
    }

    Ok(())
}

/// Execute the index command.
fn index_command(posts: &Path, output: &Path) -> Result<()> {
    let index = update_index(posts, output)?;
    println!(
        "{} {} with {} article(s)",
        style("Updated").green().bold(),
        output.display(),
        index.articles.len()
    );
    Ok(())
}

/// Execute the sitemap command.
fn sitemap_command(posts: &Path, output: &Path, options: &SitemapOptions) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let report = generate_sitemaps(posts, output, options)?;

    if report.pages.is_empty() {
        println!(
            "{}",
            style("No articles found, no sitemaps written").yellow()
        );
        return Ok(());
    }

    for page in &report.pages {
        println!("  {}", style(page.display()).green());
    }
    if let Some(index) = &report.index {
        println!(
            "{} {} ({} URL(s) in {} sitemap(s))",
            style("Saved index:").green().bold(),
            index.display(),
            report.url_count,
            report.pages.len()
        );
    }
    Ok(())
}
