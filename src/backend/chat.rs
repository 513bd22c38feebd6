use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::ChatBackend;

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Recoverable failures (quota, rate limit, missing model, 5xx, network)
/// walk down a fixed fallback chain of cheaper models; authentication and
/// request errors fail immediately without trying the rest of the chain.
pub struct MistralChat {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Outcome of a single model attempt, split by whether the rest of the
/// fallback chain is worth trying.
enum Attempt {
    Recoverable(anyhow::Error),
    Critical(anyhow::Error),
}

/// Fallback chain for a starting model. Unknown models get no fallback.
fn fallback_chain(model: &str) -> Vec<String> {
    let chain: &[&str] = match model {
        "mistral-large-latest" => &[
            "mistral-large-latest",
            "mistral-medium",
            "mistral-small-latest",
            "open-mistral-7b",
        ],
        "mistral-medium" => &["mistral-medium", "mistral-small-latest", "open-mistral-7b"],
        "mistral-small-latest" => &["mistral-small-latest", "open-mistral-7b"],
        other => return vec![other.to_string()],
    };
    chain.iter().map(|m| m.to_string()).collect()
}

impl MistralChat {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build chat HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn try_model(&self, model: &str, system: &str, user: &str, json_mode: bool) -> Result<String, Attempt> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut body = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });
        if json_mode {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Attempt::Recoverable(anyhow!("chat request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = detail.chars().take(500).collect::<String>();
            let err = anyhow!("chat backend returned {}: {}", status, detail);
            // Bad key, missing permission or malformed request: no model in
            // the chain will do better.
            return match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(Attempt::Critical(err))
                }
                _ => Err(Attempt::Recoverable(err)),
            };
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Attempt::Recoverable(anyhow!("unreadable chat payload: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Attempt::Recoverable(anyhow!("chat backend returned no choices")))?;

        Ok(content)
    }
}

#[async_trait]
impl ChatBackend for MistralChat {
    async fn complete(&self, system: &str, user: &str, json_mode: bool) -> Result<String> {
        let chain = fallback_chain(&self.model);
        info!("Chat completion starting with model: {}", self.model);

        let mut last_error = None;
        for (attempt, model) in chain.iter().enumerate() {
            match self.try_model(model, system, user, json_mode).await {
                Ok(content) => {
                    if attempt > 0 {
                        warn!("Fallback succeeded with {}", model);
                    }
                    return Ok(content);
                }
                Err(Attempt::Critical(e)) => return Err(e),
                Err(Attempt::Recoverable(e)) => {
                    warn!("Model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("empty fallback chain"))
            .context(format!("all models in the {} chain failed", self.model)))
    }
}
