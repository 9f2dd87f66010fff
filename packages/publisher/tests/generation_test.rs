//! Hugging Face client and generation workflow against a mock HTTP server.
//!
//! The client is blocking, so every call runs on `spawn_blocking`.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pressroom_publisher::generate::{
    generate_next, GenerationConfig, HuggingFaceClient, TextGenerator,
};
use pressroom_publisher::queue::{GenerationLog, TitleQueue};
use pressroom_publisher::PublisherError;

fn config_for(server: &MockServer) -> GenerationConfig {
    GenerationConfig::builder("hf_test_token")
        .api_url(format!("{}/models/test-model", server.uri()))
        .timeout_secs(5)
        .build()
}

#[tokio::test]
async fn test_client_sends_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-model"))
        .and(header("authorization", "Bearer hf_test_token"))
        .and(body_partial_json(serde_json::json!({
            "inputs": "Topic: Bees",
            "parameters": { "max_new_tokens": 1500, "return_full_text": false },
            "options": { "wait_for_model": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "generated_text": "\n# Bees\n\nBees are insects.\n" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let text = tokio::task::spawn_blocking(move || {
        HuggingFaceClient::new(&config)?.generate("Topic: Bees")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(text, "# Bees\n\nBees are insects.");
}

#[tokio::test]
async fn test_client_reports_api_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Model is currently loading" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        HuggingFaceClient::new(&config)?.generate("Topic: Bees")
    })
    .await
    .unwrap();

    match result {
        Err(PublisherError::GenerationApi { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Model is currently loading");
        }
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_client_rejects_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "estimated_time": 20 })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        HuggingFaceClient::new(&config)?.generate("Topic: Bees")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(PublisherError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_generate_next_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "generated_text": "# Remote Work Tips\n\nKeep a routine." }
        ])))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    fs::write(root.join("titles.txt"), "Remote Work Tips\nGarden Bees\n").unwrap();

    let config = config_for(&server);
    let worker_root = root.clone();
    let post = tokio::task::spawn_blocking(move || {
        let client = HuggingFaceClient::new(&config)?;
        generate_next(
            &TitleQueue::new(worker_root.join("titles.txt")),
            &client,
            &worker_root.join("posts"),
            &GenerationLog::new(worker_root.join("log.txt")),
        )
    })
    .await
    .unwrap()
    .unwrap()
    .unwrap();

    assert_eq!(post.file_name, "remote-work-tips.md");
    assert_eq!(
        fs::read_to_string(root.join("posts/remote-work-tips.md")).unwrap(),
        "# Remote Work Tips\n\nKeep a routine.\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("titles.txt")).unwrap(),
        "Garden Bees\n"
    );
    assert!(fs::read_to_string(root.join("log.txt"))
        .unwrap()
        .contains("GENERATED: Remote Work Tips -> remote-work-tips.md"));
}

#[tokio::test]
async fn test_generate_next_failure_leaves_queue_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let original = "Remote Work Tips\n\n\nGarden Bees";
    fs::write(root.join("titles.txt"), original).unwrap();

    let config = config_for(&server);
    let worker_root = root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let client = HuggingFaceClient::new(&config)?;
        generate_next(
            &TitleQueue::new(worker_root.join("titles.txt")),
            &client,
            &worker_root.join("posts"),
            &GenerationLog::new(worker_root.join("log.txt")),
        )
    })
    .await
    .unwrap();

    match result {
        Err(PublisherError::GenerationApi { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(root.join("titles.txt")).unwrap(), original);
    assert!(!root.join("log.txt").exists());
}
