//! Domain types for the dream-analysis pipeline: the narrative, the four
//! interpretation lenses, emotion scores, and the aggregate result.

mod emotions;
mod interpretation;
mod lens;
mod narrative;
mod result;

pub use emotions::{display_label, DominantEmotion, DreamType, EmotionScores};
pub use interpretation::{sentence_count, InterpretationRecord};
pub use lens::Lens;
pub use narrative::DreamNarrative;
pub use result::{AnalysisResponse, AnalysisResult};
