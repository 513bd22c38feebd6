// Integration tests for emotion scoring and dream-type classification
// against a mocked chat-completion backend.

use httpmock::prelude::*;
use onyria::{AnalysisError, DreamNarrative, EmotionClassifier, MistralChat, Stage};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn classifier_for(server: &MockServer) -> EmotionClassifier {
    let chat = MistralChat::new(
        server.url(""),
        "test-key",
        "open-mistral-7b",
        Duration::from_secs(5),
    )
    .unwrap();
    EmotionClassifier::new(Arc::new(chat)).unwrap()
}

fn scores_payload(scores: &serde_json::Value) -> serde_json::Value {
    json!({
        "choices": [
            {"message": {"role": "assistant", "content": scores.to_string()}}
        ]
    })
}

#[tokio::test]
async fn scores_are_normalized_and_dominant_extracted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(scores_payload(&json!({
            "joie": 3.0,
            "surprise": 1.0,
            "peur": -1.0
        })));
    });

    let classifier = classifier_for(&server);
    let narrative = DreamNarrative::new("J'ai rêvé d'un oiseau bleu").unwrap();

    let (scores, dominant) = classifier.analyze(&narrative).await.unwrap();

    let total: f64 = scores.0.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "softmax sum was {}", total);
    assert_eq!(dominant.label(), "joie");
    assert!(dominant.confidence() > 0.0 && dominant.confidence() <= 1.0);
}

#[tokio::test]
async fn joyful_scores_classify_as_dream() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(scores_payload(&json!({
            "joie": 4.0,
            "sérénité": 2.0,
            "peur": 0.5
        })));
    });

    let classifier = classifier_for(&server);
    let narrative = DreamNarrative::new("Un rêve paisible").unwrap();

    let (scores, _) = classifier.analyze(&narrative).await.unwrap();
    assert_eq!(classifier.dream_type(&scores).label(), "Rêve");
}

#[tokio::test]
async fn fearful_scores_classify_as_nightmare() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(scores_payload(&json!({
            "peur": 4.0,
            "anxiété": 3.0,
            "joie": 0.2
        })));
    });

    let classifier = classifier_for(&server);
    let narrative = DreamNarrative::new("Je tombais sans fin dans le noir").unwrap();

    let (scores, dominant) = classifier.analyze(&narrative).await.unwrap();
    assert_eq!(dominant.label(), "peur");
    assert_eq!(classifier.dream_type(&scores).label(), "Cauchemar");
}

#[tokio::test]
async fn unreachable_backend_is_a_classification_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(503).body("down");
    });

    let classifier = classifier_for(&server);
    let narrative = DreamNarrative::new("Un rêve").unwrap();

    let err = classifier.analyze(&narrative).await.unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::UpstreamFailure {
            stage: Stage::Classification,
            ..
        }
    ));
}

#[tokio::test]
async fn malformed_scores_are_a_classification_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(scores_payload(&json!({
            "joie": "beaucoup"
        })));
    });

    let classifier = classifier_for(&server);
    let narrative = DreamNarrative::new("Un rêve").unwrap();

    let err = classifier.analyze(&narrative).await.unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::UpstreamFailure {
            stage: Stage::Classification,
            ..
        }
    ));
}
