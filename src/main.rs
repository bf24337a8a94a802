//! Mortgage Package Analyzer
//!
//! A local web server for analyzing uploaded PDF mortgage packages:
//! extracts text (with OCR fallback for scanned documents), identifies
//! document sections by keyword matching, and serves a small browser UI.
//! All processing happens on this machine.

use std::net::SocketAddr;

use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mortgage_analyzer_server::config::Config;
use mortgage_analyzer_server::extract::OcrEngine;
use mortgage_analyzer_server::routes;
use mortgage_analyzer_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mortgage_analyzer_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!(
        "Starting Mortgage Package Analyzer v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Max upload size: {} MB", config.upload.max_size_mb);

    // Create application state
    let state = AppState::new(config.clone());

    // Probe the OCR backend once at startup
    match state.extractor().ocr_engine() {
        Some(engine) => {
            if engine.is_available().await {
                tracing::info!("OCR engine '{}' available", engine.name());
            } else {
                tracing::warn!(
                    "OCR engine '{}' configured but not runnable on this machine",
                    engine.name()
                );
            }
        }
        None => tracing::info!("OCR disabled; scanned documents will not be readable"),
    }

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server with graceful shutdown; local tool, so loopback only
    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    tracing::info!("Mortgage Package Analyzer listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
