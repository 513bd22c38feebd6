//! HTTP clients for the external AI collaborators: chat completion,
//! audio transcription, and image generation.
//!
//! Each collaborator sits behind a trait so the pipeline can be exercised
//! against fakes. The concrete clients are built once at startup from the
//! service configuration and injected; nothing here is ambient state.

mod chat;
mod image;
mod transcribe;

pub use chat::MistralChat;
pub use image::MistralImage;
pub use transcribe::{AudioClip, GroqTranscriber};

use anyhow::Result;
use async_trait::async_trait;

/// Chat-completion collaborator answering a system + user prompt pair.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete a prompt. With `json_mode` the backend is asked for a single
    /// JSON object as its whole answer.
    async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String>;
}

/// Speech-to-text collaborator converting an uploaded clip to plain text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip, language: &str) -> Result<String>;

    /// Cheap reachability probe against the backend.
    async fn health(&self) -> Result<String>;
}

/// Text-to-image collaborator returning one encoded image.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Render one image for the given prompt, returning PNG bytes.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>>;
}
