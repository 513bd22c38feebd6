use thiserror::Error;

/// Pipeline stage an upstream collaborator failure is attributed to.
///
/// The response assembler needs to tell these apart from generation
/// failures, so they carry their own variant instead of being folded
/// into a generic error string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Classification,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Transcription => write!(f, "transcription"),
            Stage::Classification => write!(f, "classification"),
        }
    }
}

/// Typed failures surfaced by the dream-analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The narrative (or the upload that should produce one) is empty or missing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The generation backend is unreachable or returned content that cannot
    /// be shaped into a four-lens interpretation record.
    #[error("generation failure: {0}")]
    GenerationFailure(String),

    /// A transcription or classification collaborator is unreachable or
    /// answered with something unusable.
    #[error("{stage} failure: {reason}")]
    UpstreamFailure { stage: Stage, reason: String },
}

impl AnalysisError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(reason.into())
    }

    pub fn generation(reason: impl Into<String>) -> Self {
        AnalysisError::GenerationFailure(reason.into())
    }

    pub fn upstream(stage: Stage, reason: impl Into<String>) -> Self {
        AnalysisError::UpstreamFailure {
            stage,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly description shown next to the generic client
    /// error message.
    pub fn short_description(&self) -> String {
        self.to_string()
    }
}
