use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(handlers::health_check))
        .route(
            "/diary/transcriber/health",
            get(handlers::transcriber_health),
        )
        // Dream analysis
        .route("/diary/analyse", post(handlers::analyse_from_voice))
        // Generated images
        .nest_service("/media", ServeDir::new(state.media_root.clone()))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        // The capture client records in the browser and posts from wherever
        // the pages are served
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
