use anyhow::Result;
use clap::Parser;
use onyria::{
    create_router, AppState, Config, DreamAnalyzer, DreamImageRenderer, EmotionClassifier,
    GroqTranscriber, InterpretationGenerator, MistralChat, MistralImage,
};
use onyria::{ChatBackend, ImageBackend, Transcriber};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "onyria", about = "Dream diary: transcription, emotion analysis, interpretation")]
struct Cli {
    /// Path to the service configuration file (without extension)
    #[arg(long, default_value = "config/onyria")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let transcription_key = Config::api_key(&cfg.transcription.api_key_env)?;
    let chat_key = Config::api_key(&cfg.chat.api_key_env)?;

    let transcriber: Arc<dyn Transcriber> = Arc::new(GroqTranscriber::new(
        cfg.transcription.base_url.clone(),
        transcription_key,
        cfg.transcription.model.clone(),
        Duration::from_secs(cfg.transcription.timeout_secs),
    )?);

    let interpretation_chat: Arc<dyn ChatBackend> = Arc::new(MistralChat::new(
        cfg.chat.base_url.clone(),
        chat_key.clone(),
        cfg.chat.model.clone(),
        Duration::from_secs(cfg.chat.timeout_secs),
    )?);

    let classifier_chat: Arc<dyn ChatBackend> = Arc::new(MistralChat::new(
        cfg.chat.base_url.clone(),
        chat_key.clone(),
        cfg.chat.classifier_model.clone(),
        Duration::from_secs(cfg.chat.timeout_secs),
    )?);

    let media_root = PathBuf::from(&cfg.media.root);

    let renderer = if cfg.image.enabled {
        let image_backend: Arc<dyn ImageBackend> = Arc::new(MistralImage::new(
            cfg.image.base_url.clone(),
            chat_key,
            cfg.image.model.clone(),
            Duration::from_secs(cfg.image.timeout_secs),
        )?);
        Some(DreamImageRenderer::new(
            interpretation_chat.clone(),
            image_backend,
            media_root.clone(),
            cfg.media.dream_images.clone(),
        ))
    } else {
        info!("Image generation disabled");
        None
    };

    tokio::fs::create_dir_all(media_root.join(&cfg.media.dream_images)).await?;

    let analyzer = DreamAnalyzer::new(
        transcriber.clone(),
        EmotionClassifier::new(classifier_chat)?,
        InterpretationGenerator::new(interpretation_chat),
        renderer,
    );

    let state = AppState::new(
        Arc::new(analyzer),
        transcriber,
        cfg.transcription.language.clone(),
        media_root,
        cfg.media.max_upload_bytes,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
