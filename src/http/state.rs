use crate::analysis::DreamAnalyzer;
use crate::backend::Transcriber;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers.
///
/// Everything here is immutable after startup; requests share handles, not
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<DreamAnalyzer>,

    /// Held separately from the analyzer for the health-probe route.
    pub transcriber: Arc<dyn Transcriber>,

    /// Transcription language used when the request does not name one.
    pub default_language: String,

    /// Filesystem root served under /media.
    pub media_root: PathBuf,

    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        analyzer: Arc<DreamAnalyzer>,
        transcriber: Arc<dyn Transcriber>,
        default_language: impl Into<String>,
        media_root: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            analyzer,
            transcriber,
            default_language: default_language.into(),
            media_root,
            max_upload_bytes,
        }
    }
}
