use serde::{Deserialize, Serialize};

use super::lens::Lens;
use crate::error::AnalysisError;

/// A four-lens interpretation of one dream narrative.
///
/// The four fields map to the four fixed lens keys, serialized in lens
/// order. Deserialization fails on unknown or missing keys, so a generation
/// backend that drifts from the schema is rejected rather than patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpretationRecord {
    #[serde(rename = "Freudien")]
    pub freudien: String,

    #[serde(rename = "Symbolique")]
    pub symbolique: String,

    #[serde(rename = "Cognitivo-scientifique")]
    pub cognitivo_scientifique: String,

    #[serde(rename = "Émotionnelle")]
    pub emotionnelle: String,
}

impl InterpretationRecord {
    /// Parse a backend payload and apply the structural checks.
    ///
    /// Any deviation (missing key, extra key, non-string value, empty text)
    /// is a generation failure; the caller decides whether to retry.
    pub fn from_json(raw: &str) -> Result<Self, AnalysisError> {
        let record: Self = serde_json::from_str(raw).map_err(|e| {
            AnalysisError::generation(format!("malformed interpretation payload: {}", e))
        })?;
        record.validate()?;
        Ok(record)
    }

    /// Structural validation: every lens value non-empty after trimming.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for lens in Lens::ALL {
            if self.text(lens).trim().is_empty() {
                return Err(AnalysisError::generation(format!(
                    "empty interpretation for lens {}",
                    lens.key()
                )));
            }
        }
        Ok(())
    }

    /// Text produced for one lens.
    pub fn text(&self, lens: Lens) -> &str {
        match lens {
            Lens::Freudien => &self.freudien,
            Lens::Symbolique => &self.symbolique,
            Lens::CognitivoScientifique => &self.cognitivo_scientifique,
            Lens::Emotionnelle => &self.emotionnelle,
        }
    }

    /// `(key, text)` pairs in lens order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Lens::ALL.into_iter().map(move |l| (l.key(), self.text(l)))
    }
}

/// Approximate sentence count: runs of terminator characters count once, so
/// "..." is one sentence end, not three.
pub fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_terminator = false;
    for c in text.chars() {
        let terminator = matches!(c, '.' | '!' | '?' | '…');
        if terminator && !in_terminator {
            count += 1;
        }
        in_terminator = terminator;
    }
    count
}
