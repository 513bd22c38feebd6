use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::backend::ChatBackend;
use crate::dream::{DominantEmotion, DreamNarrative, DreamType, EmotionScores};
use crate::error::{AnalysisError, Stage};
use crate::prompts;

/// Polarity reference sets used to separate dreams from nightmares.
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionPolarity {
    pub positif: Vec<String>,
    pub negatif: Vec<String>,
}

impl EmotionPolarity {
    /// Load the reference sets shipped with the service.
    pub fn reference() -> Result<Self> {
        serde_json::from_str(prompts::REFERENCE_EMOTIONS)
            .context("Invalid reference emotion sets")
    }
}

/// Scores a narrative's emotions and derives its dream type.
pub struct EmotionClassifier {
    chat: Arc<dyn ChatBackend>,
    polarity: EmotionPolarity,
}

impl EmotionClassifier {
    pub fn new(chat: Arc<dyn ChatBackend>) -> Result<Self> {
        Ok(Self {
            chat,
            polarity: EmotionPolarity::reference()?,
        })
    }

    /// Ask the chat backend for raw per-emotion scores, normalize them with
    /// softmax, and extract the dominant emotion.
    pub async fn analyze(
        &self,
        narrative: &DreamNarrative,
    ) -> Result<(EmotionScores, DominantEmotion), AnalysisError> {
        info!("Starting emotion analysis");

        let raw = self
            .chat
            .complete(prompts::EMOTION_CONTEXT, narrative.as_str(), true)
            .await
            .map_err(|e| AnalysisError::upstream(Stage::Classification, e.to_string()))?;

        let raw_scores: BTreeMap<String, f64> = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::upstream(
                Stage::Classification,
                format!("malformed emotion payload: {}", e),
            )
        })?;

        if raw_scores.is_empty() {
            return Err(AnalysisError::upstream(
                Stage::Classification,
                "no emotion scores returned",
            ));
        }

        let scores = EmotionScores(raw_scores).softmax();
        let dominant = scores.dominant().ok_or_else(|| {
            AnalysisError::upstream(Stage::Classification, "no dominant emotion")
        })?;

        info!(
            "Dominant emotion detected: {} ({:.2})",
            dominant.label(),
            dominant.confidence()
        );

        Ok((scores, dominant))
    }

    /// Nightmare when the mean negative mass outweighs the mean positive
    /// mass, dream otherwise.
    pub fn dream_type(&self, scores: &EmotionScores) -> DreamType {
        let negative = scores.mean_over(self.polarity.negatif.iter().map(String::as_str));
        let positive = scores.mean_over(self.polarity.positif.iter().map(String::as_str));
        if negative > positive {
            DreamType::Cauchemar
        } else {
            DreamType::Reve
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedChat(String);

    #[async_trait]
    impl ChatBackend for FixedChat {
        async fn complete(&self, _system: &str, _user: &str, _json_mode: bool) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn classifier_with(payload: &str) -> EmotionClassifier {
        EmotionClassifier::new(Arc::new(FixedChat(payload.to_string()))).unwrap()
    }

    fn scores(pairs: &[(&str, f64)]) -> EmotionScores {
        EmotionScores(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[tokio::test]
    async fn analyze_normalizes_scores() {
        let classifier = classifier_with(r#"{"joie": 3.0, "peur": 1.0}"#);
        let narrative = DreamNarrative::new("Un rêve joyeux").unwrap();

        let (scores, dominant) = classifier.analyze(&narrative).await.unwrap();

        let total: f64 = scores.0.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(dominant.label(), "joie");
        assert!(dominant.confidence() > 0.5 && dominant.confidence() <= 1.0);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_classification_failure() {
        let classifier = classifier_with("pas du JSON");
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
    async fn empty_score_set_is_a_classification_failure() {
        let classifier = classifier_with("{}");
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

    #[test]
    fn negative_heavy_scores_classify_as_nightmare() {
        let classifier = classifier_with("{}");
        let s = scores(&[("peur", 0.6), ("tristesse", 0.3), ("joie", 0.1)]);
        assert_eq!(classifier.dream_type(&s), DreamType::Cauchemar);
    }

    #[test]
    fn positive_heavy_scores_classify_as_dream() {
        let classifier = classifier_with("{}");
        let s = scores(&[("joie", 0.7), ("sérénité", 0.2), ("peur", 0.1)]);
        assert_eq!(classifier.dream_type(&s), DreamType::Reve);
    }

    #[test]
    fn tie_counts_as_dream() {
        let classifier = classifier_with("{}");
        let s = scores(&[("joie", 0.5), ("peur", 0.5)]);
        assert_eq!(classifier.dream_type(&s), DreamType::Reve);
    }
}
