use serde::{Deserialize, Serialize};

use super::emotions::{display_label, DominantEmotion, DreamType, EmotionScores};
use super::interpretation::InterpretationRecord;
use super::narrative::DreamNarrative;

/// Aggregate outcome of one submitted recording.
///
/// Created once per request and discarded after the response is returned;
/// nothing here is cached or persisted server-side.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub narrative: DreamNarrative,
    /// Softmax-normalized per-emotion scores.
    pub emotions: EmotionScores,
    pub dominant: DominantEmotion,
    pub dream_type: DreamType,
    pub interpretation: InterpretationRecord,
    /// URL path of the generated illustration, when image generation
    /// succeeded.
    pub image_path: Option<String>,
}

/// JSON body returned to the capture client on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub transcription: String,
    /// `[label, confidence]` pair; the label is the display form.
    pub dominant_emotion: DominantEmotion,
    pub dream_type: String,
    pub interpretation: InterpretationRecord,
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        AnalysisResponse {
            success: true,
            transcription: result.narrative.into_inner(),
            dominant_emotion: DominantEmotion(
                display_label(result.dominant.label()),
                result.dominant.confidence(),
            ),
            dream_type: result.dream_type.label().to_string(),
            interpretation: result.interpretation,
            image_path: result.image_path,
            error: None,
        }
    }
}
