//! sketchmatch-api server binary.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sketchmatch_api::{app, AppState};
use sketchmatch_compare::{CompareBackend, RekognitionBackend};
use sketchmatch_core::defaults;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "sketchmatch_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sketchmatch_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("sketchmatch-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host =
        std::env::var(defaults::ENV_HOST).unwrap_or_else(|_| defaults::HOST.to_string());
    let port: u16 = std::env::var(defaults::ENV_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::PORT);
    let photo_dir = PathBuf::from(
        std::env::var(defaults::ENV_PHOTO_DIR).unwrap_or_else(|_| defaults::PHOTO_DIR.to_string()),
    );
    let upload_dir = PathBuf::from(
        std::env::var(defaults::ENV_UPLOAD_DIR)
            .unwrap_or_else(|_| defaults::UPLOAD_DIR.to_string()),
    );

    // The upload area must exist before the first request
    std::fs::create_dir_all(&upload_dir)?;
    info!(
        photo_dir = %photo_dir.display(),
        upload_dir = %upload_dir.display(),
        "Storage directories ready"
    );

    // Comparison backend (the server still starts without one; the match
    // endpoint answers 503 until COMPARE_BASE_URL is set)
    let compare: Option<Arc<dyn CompareBackend>> = match RekognitionBackend::from_env() {
        Some(backend) => {
            let reachable = backend.health_check().await.unwrap_or(false);
            info!(
                service = backend.service_name(),
                reachable, "Comparison backend initialized"
            );
            Some(Arc::new(backend))
        }
        None => {
            info!("Comparison backend not configured (COMPARE_BASE_URL unset)");
            None
        }
    };

    let state = AppState {
        compare,
        photo_dir,
        upload_dir,
    };

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install ctrl-c handler");
    }
}
