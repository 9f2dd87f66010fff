use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PublisherError, Result};
use crate::generate::config::GenerationConfig;

/// User agent string identifying this tool.
const USER_AGENT: &str = concat!("pressroom/", env!("CARGO_PKG_VERSION"));

/// Longest response excerpt quoted in a malformed-response error.
const MAX_EXCERPT_CHARS: usize = 200;

/// Trait for text generators, enabling mocking in tests.
pub trait TextGenerator {
    /// Produce markdown for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Hugging Face Inference API client.
///
/// Sends exactly one request per call. Failures are returned to the caller,
/// which decides whether the title stays queued.
///
/// NOTE: Do NOT derive `Debug` on this struct, `api_token` would be exposed.
pub struct HuggingFaceClient {
    http: Client,
    api_token: String,
    api_url: String,
    max_new_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize)]
struct InferenceErrorResponse {
    error: String,
}

impl HuggingFaceClient {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_token: config.api_token.clone(),
            api_url: config.api_url.clone(),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        })
    }

    fn request_body<'a>(&self, prompt: &'a str) -> InferenceRequest<'a> {
        InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

impl TextGenerator for HuggingFaceClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(url = %self.api_url, "Sending generation request");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&self.request_body(prompt))
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<InferenceErrorResponse>(&body)
                .map(|r| r.error)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), message = %message, "Generation API error");
            return Err(PublisherError::GenerationApi {
                status: status.as_u16(),
                message,
            });
        }

        parse_generated_text(&body)
    }
}

/// Extract the generated text from a successful response body.
///
/// The expected shape is `[{"generated_text": "..."}]`; the text is trimmed.
pub fn parse_generated_text(body: &str) -> Result<String> {
    let items: Vec<GeneratedText> =
        serde_json::from_str(body).map_err(|_| PublisherError::MalformedResponse(excerpt(body)))?;

    let text = items
        .into_iter()
        .next()
        .ok_or_else(|| PublisherError::MalformedResponse(excerpt(body)))?
        .generated_text;

    let text = text.trim();
    if text.is_empty() {
        return Err(PublisherError::EmptyGeneration);
    }
    Ok(text.to_string())
}

fn excerpt(body: &str) -> String {
    let mut excerpt: String = body.chars().take(MAX_EXCERPT_CHARS).collect();
    if body.chars().count() > MAX_EXCERPT_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}

/// Test utilities for the text generator.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Mock generator. Returns pre-configured responses in order and
    /// remembers every prompt it received.
    pub struct MockGenerator {
        responses: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::new(vec![Ok(content.to_string())])
        }

        pub fn failing(error: PublisherError) -> Self {
            Self::new(vec![Err(error)])
        }

        /// Prompts received so far.
        pub fn prompts(&self) -> Vec<String> {
            self.prompts
                .lock()
                .map(|prompts| prompts.clone())
                .unwrap_or_default()
        }
    }

    impl TextGenerator for MockGenerator {
        fn generate(&self, prompt: &str) -> Result<String> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            let mut responses = self.responses.lock().map_err(|e| {
                PublisherError::MalformedResponse(format!("mock lock poisoned: {e}"))
            })?;
            responses.pop().unwrap_or(Err(PublisherError::EmptyGeneration))
        }
    }
}
