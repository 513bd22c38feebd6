// Integration tests for the chat backend's model fallback chain.

use httpmock::prelude::*;
use onyria::{ChatBackend, MistralChat};
use serde_json::json;
use std::time::Duration;

fn chat_for(server: &MockServer, model: &str) -> MistralChat {
    MistralChat::new(server.url(""), "test-key", model, Duration::from_secs(5)).unwrap()
}

fn answer(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn quota_error_falls_back_to_the_next_model() {
    let server = MockServer::start();
    let exhausted = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"mistral-small-latest""#);
        then.status(429).body("quota_exceeded");
    });
    let fallback = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"open-mistral-7b""#);
        then.status(200).json_body(answer("réponse de secours"));
    });

    let chat = chat_for(&server, "mistral-small-latest");
    let content = chat.complete("système", "utilisateur", false).await.unwrap();

    assert_eq!(content, "réponse de secours");
    exhausted.assert_hits(1);
    fallback.assert_hits(1);
}

#[tokio::test]
async fn authentication_error_fails_immediately() {
    let server = MockServer::start();
    let rejected = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"mistral-small-latest""#);
        then.status(401).body("invalid_api_key");
    });
    let never_reached = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"open-mistral-7b""#);
        then.status(200).json_body(answer("jamais atteint"));
    });

    let chat = chat_for(&server, "mistral-small-latest");
    let err = chat.complete("système", "utilisateur", false).await.unwrap_err();

    assert!(err.to_string().contains("401"));
    rejected.assert_hits(1);
    never_reached.assert_hits(0);
}

#[tokio::test]
async fn exhausted_chain_reports_the_last_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("service_unavailable");
    });

    let chat = chat_for(&server, "mistral-small-latest");
    let err = chat.complete("système", "utilisateur", false).await.unwrap_err();

    // Both models in the small chain were tried.
    mock.assert_hits(2);
    assert!(format!("{:#}", err).contains("503"));
}

#[tokio::test]
async fn json_mode_is_kept_across_fallbacks() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"mistral-small-latest""#);
        then.status(429).body("rate_limit");
    });
    let fallback = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains(r#""model":"open-mistral-7b""#)
            .body_contains(r#""response_format":{"type":"json_object"}"#);
        then.status(200).json_body(answer("{}"));
    });

    let chat = chat_for(&server, "mistral-small-latest");
    chat.complete("système", "utilisateur", true).await.unwrap();

    fallback.assert_hits(1);
}
