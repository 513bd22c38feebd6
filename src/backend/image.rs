use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::ImageBackend;

/// Client for an OpenAI-compatible `images/generations` endpoint asking
/// for a base64-encoded PNG.
pub struct MistralImage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    b64_json: String,
}

impl MistralImage {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build image HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl ImageBackend for MistralImage {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/images/generations",
            self.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Image generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = detail.chars().take(500).collect::<String>();
            bail!("image backend returned {}: {}", status, detail);
        }

        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .context("Unreadable image payload")?;

        let encoded = match parsed.data.into_iter().next() {
            Some(image) => image.b64_json,
            None => bail!("image backend returned no image"),
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .context("Generated image is not valid base64")?;

        info!("Image generated ({} bytes)", bytes.len());
        Ok(bytes)
    }
}
