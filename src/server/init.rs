//! Server initialization and run loop

use super::config::AppConfig;
use super::loader::load_config;
use crate::api::api_router;
use anyhow::{Context, Result};
use axum::{Extension, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use wabridge_core::{InboundRelay, OutboundRelay};
use wabridge_store::{MessageStore, SqliteMessageStore};

/// Relays shared with the request handlers
#[derive(Clone)]
struct AppState {
    outbound: Arc<OutboundRelay>,
    inbound: Arc<InboundRelay>,
}

/// Open the configured SQLite message store
pub async fn open_store(config: &AppConfig) -> Result<SqliteMessageStore> {
    SqliteMessageStore::from_path(&config.store.path, &config.store.table)
        .await
        .with_context(|| {
            format!(
                "Failed to open message store at {}",
                config.store.path.display()
            )
        })
}

/// Build the HTTP router over the given relays
fn build_router(state: AppState) -> Router {
    api_router()
        .layer(Extension(state.outbound))
        .layer(Extension(state.inbound))
        .layer(TraceLayer::new_for_http())
}

/// Load configuration, build both relays and serve until shutdown
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let relay_config = config.relay_config();
    relay_config
        .validate()
        .context("Invalid configuration")?;

    let store = open_store(&config).await?;
    info!(
        store = store.name(),
        table = store.table(),
        "Message store ready"
    );

    let state = AppState {
        outbound: Arc::new(
            OutboundRelay::from_config(&relay_config, Arc::new(store))
                .context("Failed to create outbound relay")?,
        ),
        inbound: Arc::new(
            InboundRelay::from_config(&relay_config).context("Failed to create inbound relay")?,
        ),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("wabridge shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
