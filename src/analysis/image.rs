use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::backend::{ChatBackend, ImageBackend};
use crate::dream::DreamNarrative;
use crate::prompts;

/// Renders an illustration for a dream narrative and stores it under the
/// media root.
///
/// The narrative is first condensed into a short scene description by the
/// chat backend, since image models work better from a focused prompt than
/// from a rambling first-person account.
pub struct DreamImageRenderer {
    chat: Arc<dyn ChatBackend>,
    image: Arc<dyn ImageBackend>,
    media_root: PathBuf,
    subdir: String,
}

impl DreamImageRenderer {
    pub fn new(
        chat: Arc<dyn ChatBackend>,
        image: Arc<dyn ImageBackend>,
        media_root: PathBuf,
        subdir: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            image,
            media_root,
            subdir: subdir.into(),
        }
    }

    /// Generate and store one image, returning its public URL path.
    pub async fn render(&self, narrative: &DreamNarrative) -> Result<String> {
        let prompt = self
            .chat
            .complete(prompts::IMAGE_SUMMARY, narrative.as_str(), false)
            .await
            .context("Failed to condense narrative into an image prompt")?;

        let bytes = self
            .image
            .generate(prompt.trim())
            .await
            .context("Image generation failed")?;

        let file_name = format!(
            "dream_{}_{}.png",
            Uuid::new_v4(),
            Utc::now().format("%Y%m%d_%H%M%S")
        );

        let dir = self.media_root.join(&self.subdir);
        tokio::fs::create_dir_all(&dir)
            .await
            .context("Failed to create image directory")?;

        let path = dir.join(&file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        info!("Dream image stored at {}", path.display());

        Ok(format!("/media/{}/{}", self.subdir, file_name))
    }
}
