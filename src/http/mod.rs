//! HTTP API server for the capture client
//!
//! This module provides the JSON API the recording pages call:
//! - POST /diary/analyse - Analyse an uploaded dream recording
//! - GET /diary/transcriber/health - Probe the transcription backend
//! - GET /health - Health check
//! - /media/* - Generated dream images

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, ProbeResponse};
pub use routes::create_router;
pub use state::AppState;
