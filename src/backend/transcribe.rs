use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::Transcriber;

/// Accepted audio MIME types and their preferred file extensions.
///
/// Browsers are inconsistent here: some report `audio/mp4` for m4a, Safari
/// may report `video/mp4`, and MediaRecorder defaults to webm.
const ACCEPTED_MIMES: &[(&str, &str)] = &[
    ("audio/flac", ".flac"),
    ("audio/mpeg", ".mp3"),
    ("audio/mp3", ".mp3"),
    ("audio/mpga", ".mp3"),
    ("audio/mp4", ".m4a"),
    ("video/mp4", ".mp4"),
    ("audio/ogg", ".ogg"),
    ("audio/opus", ".opus"),
    ("audio/wav", ".wav"),
    ("audio/webm", ".webm"),
];

/// One encoded audio clip as uploaded by the capture client.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioClip {
    /// Normalize the browser-declared name and MIME type into a pair the
    /// transcription endpoint accepts.
    ///
    /// Unknown MIME types are inferred from the filename extension; when
    /// that fails too, the clip is assumed to be `audio/webm`, the container
    /// MediaRecorder produces by default.
    pub fn normalized(name: Option<&str>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let orig_name = name.unwrap_or("audio").to_string();
        let declared = content_type
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        let mut resolved = ACCEPTED_MIMES
            .iter()
            .find(|(mime, _)| *mime == declared)
            .copied();

        if resolved.is_none() {
            let lower = orig_name.to_ascii_lowercase();
            resolved = ACCEPTED_MIMES
                .iter()
                .find(|(_, ext)| lower.ends_with(ext))
                .copied();
        }

        let (mime, ext) = resolved.unwrap_or(("audio/webm", ".webm"));

        let file_name = if orig_name.to_ascii_lowercase().ends_with(ext) {
            orig_name
        } else {
            format!("record{}", ext)
        };

        Self {
            bytes,
            file_name,
            mime_type: mime.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Client for an OpenAI-compatible `audio/transcriptions` endpoint
/// (Whisper hosted on Groq in the default configuration).
pub struct GroqTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl GroqTranscriber {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build transcription HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(&self, clip: &AudioClip, language: &str) -> Result<String> {
        let url = format!(
            "{}/audio/transcriptions",
            self.base_url.trim_end_matches('/')
        );

        info!(
            "Sending clip to transcription: name={}, mime={}, size={}",
            clip.file_name,
            clip.mime_type,
            clip.bytes.len()
        );

        let part = reqwest::multipart::Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name.clone())
            .mime_str(&clip.mime_type)
            .context("Invalid MIME type for audio part")?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", language.to_string())
            .text("temperature", "0");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = detail.chars().take(500).collect::<String>();
            bail!("transcription backend returned {}: {}", status, detail);
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .context("Unreadable transcription payload")?;

        let text = parsed.text.trim().to_string();
        if text.is_empty() {
            bail!("empty transcription");
        }

        info!("Transcription succeeded ({} chars)", text.len());
        Ok(text)
    }

    async fn health(&self) -> Result<String> {
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Transcription health probe failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("transcription backend returned {}", status);
        }

        let models: ModelList = response
            .json()
            .await
            .context("Unreadable model list payload")?;

        Ok(format!("models_count={}", models.data.len()))
    }
}
