//! Document segmentation into articles.
//!
//! A paragraph whose trimmed text starts with `# ` opens a new article;
//! everything up to the next such paragraph (or the end of the stream)
//! belongs to it. The pass is modelled as a two-state machine
//! (`NoOpenArticle`, `ArticleOpen`) driven by blank/marker/content events.

mod engine;
mod policy;
mod state;
mod text;

pub use engine::{SegmentRun, Segmentation, Segmenter};
pub use policy::{LeadingContent, SegmentPolicy};
pub use state::{ParagraphEvent, PendingArticle, SegmentState};
pub use text::{clean_content, is_blank, is_title_marker, title_from_line, TITLE_MARKER};
