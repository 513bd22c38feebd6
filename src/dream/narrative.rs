use crate::error::AnalysisError;

/// A transcribed dream account.
///
/// Immutable once produced and owned by the request that created it; the
/// service never persists it past the response lifecycle. Construction
/// rejects empty text, so every downstream consumer can assume a usable
/// narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamNarrative(String);

impl DreamNarrative {
    /// Wrap a transcription, rejecting empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> Result<Self, AnalysisError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::invalid_input("empty narrative"));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DreamNarrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
