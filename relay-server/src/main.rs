//! Relay Server - JSON to Pub/Sub and BigQuery
//!
//! Architecture:
//! - Axum HTTP server receives arbitrary JSON payloads
//! - `/publish` forwards them to a Pub/Sub topic
//! - `/process` streams them into a BigQuery table, one row per request
//!
//! # Usage
//!
//! ```bash
//! # Requires application default credentials
//! PUBSUB_TOPIC=events BIGQUERY_TABLE=analytics.events cargo run --bin relay-server
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio_util::task::TaskTracker;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_server::gcp::{self, GoogleCredentials};
use relay_server::{build_router, AppState, BigQueryClient, Config, PubSubPublisher};

/// How long in-flight publishes may take to finish once the server stops
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init();
    }

    info!("Starting Relay Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Google clients, created once and shared by every request
    let credentials = GoogleCredentials::discover().await?;
    let project_id = credentials.resolve_project(config.project_id.clone()).await;
    let tokens = Arc::new(credentials);
    let http = gcp::http_client()?;

    let state = AppState {
        publisher: Arc::new(PubSubPublisher::new(http.clone(), tokens.clone())),
        tables: Arc::new(BigQueryClient::new(http, tokens)),
        project_id,
        pubsub_topic: config.pubsub_topic.clone(),
        bigquery_table: config.bigquery_table.clone(),
        background: TaskTracker::new(),
    };

    let app = build_router(state.clone());

    // Start server
    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.drain_background(DRAIN_TIMEOUT).await;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
