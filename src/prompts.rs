//! Prompt assets shipped with the service, embedded at compile time.
//!
//! The interpretation prompt carries the per-lens content policy; keeping it
//! as an asset (rather than string-building in code) mirrors how the prompts
//! are reviewed and edited.

/// System prompt for the four-lens interpretation.
pub const INTERPRETATION: &str = include_str!("../prompts/context_interpretation.txt");

/// System prompt for per-emotion scoring.
pub const EMOTION_CONTEXT: &str = include_str!("../prompts/context_emotion.txt");

/// System prompt that condenses a narrative into an image prompt.
pub const IMAGE_SUMMARY: &str = include_str!("../prompts/resume_text.txt");

/// Polarity reference sets (JSON) used for dream-type classification.
pub const REFERENCE_EMOTIONS: &str = include_str!("../prompts/reference_emotions.json");
