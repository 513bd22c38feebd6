use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub transcription: TranscriptionConfig,
    pub chat: ChatConfig,
    pub image: ImageConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Default transcription language; requests may override it.
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub base_url: String,
    /// Model used for interpretation and image-prompt condensation.
    pub model: String,
    /// Cheaper model used for emotion scoring.
    pub classifier_model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Filesystem root served under /media.
    pub root: String,
    /// Subdirectory for generated dream images.
    pub dream_images: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve an API key from the environment variable named in the
    /// configuration, trimming stray CR/LF that pasted keys tend to carry.
    pub fn api_key(env_name: &str) -> Result<String> {
        let raw = std::env::var(env_name)
            .with_context(|| format!("Missing API key environment variable {}", env_name))?;

        let key = raw.replace(['\r', '\n'], "").trim().to_string();
        if key.is_empty() {
            bail!("API key environment variable {} is empty", env_name);
        }

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_strips_line_endings() {
        std::env::set_var("ONYRIA_TEST_KEY", " sk-abc123\r\n");
        let key = Config::api_key("ONYRIA_TEST_KEY").unwrap();
        assert_eq!(key, "sk-abc123");
        std::env::remove_var("ONYRIA_TEST_KEY");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        std::env::set_var("ONYRIA_EMPTY_KEY", "\r\n");
        assert!(Config::api_key("ONYRIA_EMPTY_KEY").is_err());
        std::env::remove_var("ONYRIA_EMPTY_KEY");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        assert!(Config::api_key("ONYRIA_ABSENT_KEY").is_err());
    }
}
