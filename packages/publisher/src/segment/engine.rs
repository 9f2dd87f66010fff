//! Segmenter: partitions a paragraph stream into articles in a single pass.

use super::policy::{LeadingContent, SegmentPolicy};
use super::state::{ParagraphEvent, PendingArticle, SegmentState};
use crate::types::Article;

/// Result of segmenting one paragraph stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Finalized articles in encounter order.
    pub articles: Vec<Article>,

    /// Non-fatal issues found in the stream.
    pub warnings: Vec<String>,

    /// Content paragraphs dropped because no article was open.
    pub discarded_paragraphs: usize,
}

/// Splits paragraph streams into articles at `# ` title markers.
///
/// The segmenter holds no state between calls, so segmenting the same
/// stream twice yields identical output.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    policy: SegmentPolicy,
}

impl Segmenter {
    /// Create a segmenter with the given policy.
    #[must_use]
    pub fn new(policy: SegmentPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use.
    #[must_use]
    pub fn policy(&self) -> &SegmentPolicy {
        &self.policy
    }

    /// Segment a full paragraph stream.
    ///
    /// # Examples
    /// ```
    /// use pressroom_publisher::segment::Segmenter;
    ///
    /// let paragraphs = ["# Intro to Bees", "Bees are insects.", "", "# Intro to Ants", "Ants are insects too."];
    /// let outcome = Segmenter::default().segment(paragraphs);
    ///
    /// assert_eq!(outcome.articles.len(), 2);
    /// assert_eq!(outcome.articles[1].title, "Intro to Ants");
    /// assert_eq!(outcome.articles[1].body, vec!["Ants are insects too."]);
    /// ```
    pub fn segment<I, S>(&self, paragraphs: I) -> Segmentation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut run = SegmentRun::new(&self.policy);
        for paragraph in paragraphs {
            run.feed(paragraph.as_ref());
        }
        run.finish()
    }
}

/// One pass of the state machine over a paragraph stream.
///
/// Exposed so the transitions can be driven paragraph by paragraph.
#[derive(Debug)]
pub struct SegmentRun<'p> {
    policy: &'p SegmentPolicy,
    state: SegmentState,
    counter: usize,
    outcome: Segmentation,
}

impl<'p> SegmentRun<'p> {
    /// Start a run in the `NoOpenArticle` state.
    #[must_use]
    pub fn new(policy: &'p SegmentPolicy) -> Self {
        Self {
            policy,
            state: SegmentState::NoOpenArticle,
            counter: 0,
            outcome: Segmentation::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SegmentState {
        &self.state
    }

    /// Articles finalized so far.
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.outcome.articles
    }

    /// Feed one paragraph.
    pub fn feed(&mut self, paragraph: &str) {
        let state = std::mem::take(&mut self.state);

        self.state = match (ParagraphEvent::classify(paragraph), state) {
            (ParagraphEvent::Blank, state) => state,

            (ParagraphEvent::Marker(text), state) => {
                if let SegmentState::ArticleOpen(pending) = state {
                    self.emit(pending);
                }
                SegmentState::ArticleOpen(PendingArticle::from_marker(
                    text,
                    &self.policy.placeholder_title,
                ))
            }

            (ParagraphEvent::Content(text), SegmentState::ArticleOpen(mut pending)) => {
                pending.push_content(text);
                SegmentState::ArticleOpen(pending)
            }

            (ParagraphEvent::Content(text), SegmentState::NoOpenArticle) => {
                match self.policy.leading_content {
                    LeadingContent::Discard => {
                        tracing::debug!("Discarding content before first title marker");
                        self.outcome.discarded_paragraphs += 1;
                        SegmentState::NoOpenArticle
                    }
                    LeadingContent::Preamble => {
                        let mut pending = PendingArticle::untitled(&self.policy.placeholder_title);
                        pending.push_content(text);
                        SegmentState::ArticleOpen(pending)
                    }
                }
            }
        };
    }

    /// Close the pending article, if any, and return the outcome.
    #[must_use]
    pub fn finish(mut self) -> Segmentation {
        if let SegmentState::ArticleOpen(pending) = std::mem::take(&mut self.state) {
            self.emit(pending);
        }

        if self.outcome.discarded_paragraphs > 0 {
            let warning = format!(
                "Discarded {} paragraph(s) before the first title marker",
                self.outcome.discarded_paragraphs
            );
            tracing::warn!("{warning}");
            self.outcome.warnings.push(warning);
        }

        self.outcome
    }

    fn emit(&mut self, pending: PendingArticle) {
        self.counter += 1;
        if pending.has_placeholder_title() {
            let warning = format!(
                "Article {}: no heading line found, using title '{}'",
                self.counter,
                pending.title()
            );
            tracing::warn!("{warning}");
            self.outcome.warnings.push(warning);
        }
        self.outcome.articles.push(pending.finalize(self.counter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_two_articles() {
        let outcome = Segmenter::default().segment([
            "# Intro to Bees",
            "Bees are insects.",
            "",
            "# Intro to Ants",
            "Ants are insects too.",
        ]);

        assert_eq!(
            outcome.articles,
            vec![
                Article::new(1, "Intro to Bees", body(&["Bees are insects."])),
                Article::new(2, "Intro to Ants", body(&["Ants are insects too."])),
            ]
        );
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_consecutive_markers_produce_empty_article() {
        let outcome = Segmenter::default().segment(["# One", "# Two", "Text"]);
        assert_eq!(outcome.articles.len(), 2);
        assert!(outcome.articles[0].is_empty());
        assert_eq!(outcome.articles[1].body, body(&["Text"]));
    }

    #[test]
    fn test_no_markers_yields_no_articles() {
        let outcome = Segmenter::default().segment(["Just text", "More text"]);
        assert!(outcome.articles.is_empty());
        assert_eq!(outcome.discarded_paragraphs, 2);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_leading_content_discarded() {
        let outcome = Segmenter::default().segment(["Cover page", "", "# Real", "Body"]);
        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(outcome.articles[0].sequence, 1);
        assert_eq!(outcome.discarded_paragraphs, 1);
    }

    #[test]
    fn test_leading_content_preamble_policy() {
        let policy = SegmentPolicy::default()
            .with_leading_content(LeadingContent::Preamble)
            .with_placeholder_title("Foreword");
        let outcome = Segmenter::new(policy).segment(["Cover page", "Credits", "# Real", "Body"]);

        assert_eq!(outcome.articles.len(), 2);
        assert_eq!(outcome.articles[0].title, "Foreword");
        assert_eq!(outcome.articles[0].body, body(&["Cover page", "Credits"]));
        assert_eq!(outcome.articles[1].sequence, 2);
        assert_eq!(outcome.discarded_paragraphs, 0);
    }

    #[test]
    fn test_whitespace_paragraphs_are_blank() {
        let outcome = Segmenter::default().segment(["# A", "   ", "\t\n", "x"]);
        assert_eq!(outcome.articles[0].body, body(&["x"]));
    }

    #[test]
    fn test_placeholder_title_warns() {
        let outcome = Segmenter::default().segment(["#  \nSubtitle only", "Body"]);
        assert_eq!(outcome.articles[0].title, "Untitled Article");
        assert_eq!(outcome.articles[0].body, body(&["Subtitle only", "Body"]));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Article 1"));
    }

    #[test]
    fn test_sub_headings_are_stripped() {
        let outcome = Segmenter::default().segment(["# A", "## Habitat", "### Diet\nThey eat nectar."]);
        assert_eq!(
            outcome.articles[0].body,
            body(&["Habitat", "Diet\nThey eat nectar."])
        );
    }

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let paragraphs: Vec<String> = (0..25)
            .flat_map(|i| [format!("# Title {i}"), format!("Body {i}"), String::new()])
            .collect();
        let outcome = Segmenter::default().segment(&paragraphs);

        let sequences: Vec<usize> = outcome.articles.iter().map(|a| a.sequence).collect();
        assert_eq!(sequences, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_segment_is_idempotent() {
        let paragraphs = ["intro", "# A", "a", "", "# B", "#  \nb", "c\n\n\nd"];
        let segmenter = Segmenter::default();
        assert_eq!(segmenter.segment(paragraphs), segmenter.segment(paragraphs));
    }

    #[test]
    fn test_run_transitions() {
        let policy = SegmentPolicy::default();
        let mut run = SegmentRun::new(&policy);
        assert_eq!(run.state(), &SegmentState::NoOpenArticle);

        run.feed("stray");
        assert_eq!(run.state(), &SegmentState::NoOpenArticle);

        run.feed("# First");
        assert!(matches!(run.state(), SegmentState::ArticleOpen(_)));
        assert!(run.articles().is_empty());

        run.feed("# Second");
        assert_eq!(run.articles().len(), 1);

        let outcome = run.finish();
        assert_eq!(outcome.articles.len(), 2);
        assert_eq!(outcome.articles[1].title, "Second");
    }

    /// Split a stream at its markers by hand and clean every paragraph in
    /// between, as the article bodies should come out.
    fn expected_articles(stream: &[String]) -> Vec<(String, Vec<String>)> {
        use crate::segment::{clean_content, is_title_marker, title_from_line};

        let mut expected: Vec<(String, Vec<String>)> = Vec::new();
        for paragraph in stream {
            if is_title_marker(paragraph) {
                expected.push((title_from_line(paragraph).unwrap(), Vec::new()));
            } else if let Some((_, body)) = expected.last_mut() {
                body.extend(clean_content(paragraph));
            }
        }
        expected
    }

    #[test]
    fn test_bodies_preserve_content_between_markers() {
        let fillers = [
            "",
            "   ",
            "## Sub heading",
            "Plain paragraph.",
            "First line\n\n\n\nafter a blank run",
            "###",
            "  indented  \ntrailing   \n",
            "\t",
        ];

        let mut stream: Vec<String> = vec!["Lead-in before any article".to_string()];
        for article in 0..12 {
            stream.push(format!("# Article {article}"));
            for step in 0..(article % 5 + 1) {
                stream.push(fillers[(article * 3 + step) % fillers.len()].to_string());
                stream.push(format!("Body {article}.{step}"));
            }
        }

        let outcome = Segmenter::default().segment(&stream);
        let expected = expected_articles(&stream);

        assert_eq!(outcome.articles.len(), expected.len());
        for (idx, (article, (title, body))) in outcome.articles.iter().zip(&expected).enumerate() {
            assert_eq!(article.sequence, idx + 1);
            assert_eq!(&article.title, title);
            assert_eq!(&article.body, body);
        }

        // Every non-blank content paragraph after the first marker is kept.
        let kept: usize = outcome.articles.iter().map(|a| a.body.len()).sum();
        let content = stream
            .iter()
            .skip(1)
            .filter(|p| !p.starts_with("# "))
            .filter(|p| !p.trim().trim_start_matches('#').trim().is_empty())
            .count();
        assert_eq!(kept, content);
        assert_eq!(outcome.discarded_paragraphs, 1);
    }
}
