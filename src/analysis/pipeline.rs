use std::sync::Arc;
use tracing::{info, warn};

use super::classifier::EmotionClassifier;
use super::image::DreamImageRenderer;
use super::interpreter::InterpretationGenerator;
use crate::backend::{AudioClip, Transcriber};
use crate::dream::{AnalysisResult, DreamNarrative};
use crate::error::{AnalysisError, Stage};

/// End-to-end analysis of one uploaded dream recording.
///
/// Each request runs independently; the analyzer holds no mutable state,
/// only handles to the startup-initialized collaborators.
pub struct DreamAnalyzer {
    transcriber: Arc<dyn Transcriber>,
    classifier: EmotionClassifier,
    interpreter: InterpretationGenerator,
    /// Absent when image generation is disabled in the configuration.
    renderer: Option<DreamImageRenderer>,
}

impl DreamAnalyzer {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        classifier: EmotionClassifier,
        interpreter: InterpretationGenerator,
        renderer: Option<DreamImageRenderer>,
    ) -> Self {
        Self {
            transcriber,
            classifier,
            interpreter,
            renderer,
        }
    }

    /// Run the full pipeline: transcription, emotion analysis, dream-type
    /// classification, interpretation, then (best-effort) illustration.
    ///
    /// Any failure before the interpretation step aborts the analysis; a
    /// failed illustration only costs the image, never the analysis.
    pub async fn analyze(
        &self,
        clip: AudioClip,
        language: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        if clip.is_empty() {
            return Err(AnalysisError::invalid_input("empty audio upload"));
        }

        let text = self
            .transcriber
            .transcribe(&clip, language)
            .await
            .map_err(|e| AnalysisError::upstream(Stage::Transcription, e.to_string()))?;

        let narrative = DreamNarrative::new(text)?;
        info!("Transcription complete ({} chars)", narrative.as_str().len());

        let (emotions, dominant) = self.classifier.analyze(&narrative).await?;
        let dream_type = self.classifier.dream_type(&emotions);

        let interpretation = self.interpreter.interpret(&narrative).await?;

        let image_path = match &self.renderer {
            Some(renderer) => match renderer.render(&narrative).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Image generation skipped: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(AnalysisResult {
            narrative,
            emotions,
            dominant,
            dream_type,
            interpretation,
            image_path,
        })
    }
}
