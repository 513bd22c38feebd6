pub mod analysis;
pub mod backend;
pub mod config;
pub mod dream;
pub mod error;
pub mod http;
pub mod prompts;

pub use analysis::{
    DreamAnalyzer, DreamImageRenderer, EmotionClassifier, EmotionPolarity, InterpretationGenerator,
};
pub use backend::{
    AudioClip, ChatBackend, GroqTranscriber, ImageBackend, MistralChat, MistralImage, Transcriber,
};
pub use config::Config;
pub use dream::{
    AnalysisResponse, AnalysisResult, DominantEmotion, DreamNarrative, DreamType, EmotionScores,
    InterpretationRecord, Lens,
};
pub use error::{AnalysisError, Stage};
pub use http::{create_router, AppState};
