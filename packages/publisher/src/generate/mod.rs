//! Drafting posts from queued titles through a text-generation API.

mod client;
mod config;
mod prompt;
mod workflow;

#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::MockGenerator;
pub use client::{parse_generated_text, HuggingFaceClient, TextGenerator};
pub use config::{
    GenerationConfig, GenerationConfigBuilder, DEFAULT_MAX_NEW_TOKENS, DEFAULT_TEMPERATURE,
};
pub use prompt::build_article_prompt;
pub use workflow::{generate_next, GeneratedPost};
