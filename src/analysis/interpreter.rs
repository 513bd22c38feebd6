use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::ChatBackend;
use crate::dream::{sentence_count, DreamNarrative, InterpretationRecord, Lens};
use crate::error::AnalysisError;
use crate::prompts;

/// Produces a four-lens interpretation record from a dream narrative.
///
/// A pure transformation: text in, structured text out. The only retry is a
/// single second attempt when the backend's output fails structural
/// validation; an unreachable backend fails straight away.
pub struct InterpretationGenerator {
    chat: Arc<dyn ChatBackend>,
}

impl InterpretationGenerator {
    pub fn new(chat: Arc<dyn ChatBackend>) -> Self {
        Self { chat }
    }

    pub async fn interpret(
        &self,
        narrative: &DreamNarrative,
    ) -> Result<InterpretationRecord, AnalysisError> {
        let mut last_error = AnalysisError::generation("no attempt made");

        for attempt in 1..=2 {
            let raw = self
                .chat
                .complete(prompts::INTERPRETATION, narrative.as_str(), true)
                .await
                .map_err(|e| AnalysisError::generation(e.to_string()))?;

            match InterpretationRecord::from_json(&raw) {
                Ok(record) => {
                    for lens in Lens::ALL {
                        let sentences = sentence_count(record.text(lens));
                        if sentences > 4 {
                            warn!(
                                "Lens {} came back with {} sentences, expected at most 4",
                                lens.key(),
                                sentences
                            );
                        }
                    }
                    info!("Interpretation generated (attempt {})", attempt);
                    return Ok(record);
                }
                Err(e) => {
                    warn!("Interpretation attempt {} rejected: {}", attempt, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
