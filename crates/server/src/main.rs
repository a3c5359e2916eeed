use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidproc_core::{
    load_config, load_optional_config, validate_config, FfmpegTranscoder, ObjectStoreGateway,
    PipelineOrchestrator, Transcoder,
};
use vidproc_server::{api::create_router, state::AppState};

/// Environment variable naming the configuration file
const CONFIG_PATH_ENV: &str = "VIDEO_PROCESSOR_CONFIG";

/// Configuration file read when `VIDEO_PROCESSOR_CONFIG` is unset
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An explicit path must exist; the default one is optional.
    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            info!("Loading configuration from {:?} if present", path);
            load_optional_config(&path).context("Failed to load config")?
        }
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        backend = config.storage.backend.as_str(),
        raw_bucket = %config.storage.raw_bucket,
        processed_bucket = %config.storage.processed_bucket,
        "Storage configured"
    );

    let storage = ObjectStoreGateway::from_config(&config.storage)
        .context("Failed to create storage gateway")?;

    let transcoder = FfmpegTranscoder::new(config.transcoder.clone());
    match transcoder.validate().await {
        Ok(()) => info!("FFmpeg available at {:?}", config.transcoder.ffmpeg_path),
        Err(e) => warn!("FFmpeg validation failed, transcodes will fail: {}", e),
    }

    let orchestrator = PipelineOrchestrator::new(
        config.pipeline.clone(),
        Arc::new(storage),
        Arc::new(transcoder),
    );
    orchestrator
        .prepare()
        .await
        .with_context(|| format!("Failed to create scratch dir {:?}", config.pipeline.scratch_dir))?;
    info!("Scratch space at {:?}", orchestrator.scratch().root());

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(orchestrator));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
