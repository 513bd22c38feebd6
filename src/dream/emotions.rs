use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The single highest-scoring emotion, paired with its confidence in [0, 1].
///
/// Serialized as a two-element array, e.g. `["Joie", 0.72]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantEmotion(pub String, pub f64);

impl DominantEmotion {
    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn confidence(&self) -> f64 {
        self.1
    }
}

/// Per-emotion scores keyed by label.
///
/// Raw model scores are unbounded; `softmax` turns them into a probability
/// distribution before any downstream use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores(pub BTreeMap<String, f64>);

impl EmotionScores {
    /// Normalize raw scores with softmax so they sum to 1.
    pub fn softmax(&self) -> EmotionScores {
        let exp: BTreeMap<String, f64> =
            self.0.iter().map(|(k, v)| (k.clone(), v.exp())).collect();
        let total: f64 = exp.values().sum();
        EmotionScores(exp.into_iter().map(|(k, v)| (k, v / total)).collect())
    }

    /// Emotion with the highest score, or `None` for an empty score set.
    pub fn dominant(&self) -> Option<DominantEmotion> {
        self.0
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, score)| DominantEmotion(label.clone(), *score))
    }

    /// Mean score over the given labels; labels absent from the set are
    /// skipped. An empty selection yields 0.
    pub fn mean_over<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> f64 {
        let present: Vec<f64> = labels
            .into_iter()
            .filter_map(|l| self.0.get(l).copied())
            .collect();
        if present.is_empty() {
            return 0.0;
        }
        present.iter().sum::<f64>() / present.len() as f64
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Coarse category assigned to a dream narrative from its emotion polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DreamType {
    #[serde(rename = "rêve")]
    Reve,
    #[serde(rename = "cauchemar")]
    Cauchemar,
}

impl DreamType {
    /// Display label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            DreamType::Reve => "Rêve",
            DreamType::Cauchemar => "Cauchemar",
        }
    }
}

/// Display form of an emotion label: first letter uppercased.
pub fn display_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> EmotionScores {
        EmotionScores(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn softmax_sums_to_one() {
        let normalized = scores(&[("joie", 2.0), ("peur", 0.5), ("tristesse", -1.0)]).softmax();
        let total: f64 = normalized.0.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "softmax sum was {}", total);
    }

    #[test]
    fn softmax_preserves_ranking() {
        let normalized = scores(&[("joie", 3.0), ("peur", 1.0)]).softmax();
        assert!(normalized.0["joie"] > normalized.0["peur"]);
    }

    #[test]
    fn dominant_picks_highest_score() {
        let normalized = scores(&[("joie", 0.8), ("surprise", 0.2)]);
        let dominant = normalized.dominant().unwrap();
        assert_eq!(dominant.label(), "joie");
        assert!((dominant.confidence() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn dominant_of_empty_set_is_none() {
        assert!(EmotionScores::default().dominant().is_none());
    }

    #[test]
    fn mean_over_skips_absent_labels() {
        let s = scores(&[("joie", 0.6), ("peur", 0.2)]);
        let mean = s.mean_over(["joie", "colère"]);
        assert!((mean - 0.6).abs() < 1e-9);
    }

    #[test]
    fn mean_over_empty_selection_is_zero() {
        let s = scores(&[("joie", 0.6)]);
        assert_eq!(s.mean_over(["colère", "anxiété"]), 0.0);
    }

    #[test]
    fn dream_type_serializes_with_french_names() {
        assert_eq!(serde_json::to_string(&DreamType::Reve).unwrap(), "\"rêve\"");
        assert_eq!(
            serde_json::to_string(&DreamType::Cauchemar).unwrap(),
            "\"cauchemar\""
        );
        assert_eq!(DreamType::Cauchemar.label(), "Cauchemar");
    }

    #[test]
    fn display_label_uppercases_first_letter() {
        assert_eq!(display_label("joie"), "Joie");
        assert_eq!(display_label("émerveillement"), "Émerveillement");
        assert_eq!(display_label(""), "");
    }
}
