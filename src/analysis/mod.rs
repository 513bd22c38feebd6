//! The analysis pipeline: emotion classification, four-lens interpretation,
//! optional illustration, and the orchestration that ties them together.

mod classifier;
mod image;
mod interpreter;
mod pipeline;

pub use classifier::{EmotionClassifier, EmotionPolarity};
pub use image::DreamImageRenderer;
pub use interpreter::InterpretationGenerator;
pub use pipeline::DreamAnalyzer;
