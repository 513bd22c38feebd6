use super::state::AppState;
use crate::backend::AudioClip;
use crate::dream::AnalysisResponse;
use crate::error::AnalysisError;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{error, info};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub success: bool,
    pub message: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

/// Map a typed pipeline failure onto an HTTP status: the caller's fault is
/// 400, a collaborator's fault is 502.
fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AnalysisError::GenerationFailure(_) | AnalysisError::UpstreamFailure { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /diary/analyse
/// Run the full analysis pipeline on an uploaded dream recording.
///
/// Expects a multipart form with an `audio` file part and an optional
/// `language` text part. Either the whole analysis succeeds or a typed
/// failure is returned; partial results are never presented as complete.
pub async fn analyse_from_voice(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut clip: Option<AudioClip> = None;
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("unreadable_upload: {}", e),
                )
            }
        };

        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("audio") => {
                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("unreadable_audio: {}", e),
                        )
                    }
                };
                clip = Some(AudioClip::normalized(
                    file_name.as_deref(),
                    content_type.as_deref(),
                    bytes.to_vec(),
                ));
            }
            Some("language") => {
                language = field.text().await.ok();
            }
            _ => {}
        }
    }

    let clip = match clip {
        Some(clip) => clip,
        None => return error_response(StatusCode::BAD_REQUEST, "no_audio"),
    };
    if clip.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "empty_audio");
    }

    let language = language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| state.default_language.clone());

    info!(
        "Analysing dream recording: {} bytes, language={}",
        clip.bytes.len(),
        language
    );

    match state.analyzer.analyze(clip, &language).await {
        Ok(result) => (StatusCode::OK, Json(AnalysisResponse::from(result))).into_response(),
        Err(e) => {
            error!("Dream analysis failed: {}", e);
            error_response(status_for(&e), e.short_description())
        }
    }
}

/// GET /diary/transcriber/health
/// Probe the transcription backend to validate the key and outbound network.
pub async fn transcriber_health(State(state): State<AppState>) -> Response {
    match state.transcriber.health().await {
        Ok(message) => (
            StatusCode::OK,
            Json(ProbeResponse {
                success: true,
                message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Transcriber health probe failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
