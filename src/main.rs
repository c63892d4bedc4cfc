//! Quote Sync Server
//!
//! Serves the local quote collection and keeps it reconciled with the
//! remote collection endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quote_sync::config::Config;
use quote_sync::routes;
use quote_sync::state::AppState;
use quote_sync::storage::{create_pool, SqliteKv};
use quote_sync::sync::{HttpRemote, IntervalTicker, SyncScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "quote_sync=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Starting Quote Sync v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Remote collection: {}", config.remote.url);
    tracing::info!("Sync interval: {}s", config.remote.sync_interval().as_secs());

    // Initialize database
    let db_pool = create_pool(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database initialized at {}", config.database.url);

    let remote = HttpRemote::new(
        &config.remote.url,
        &config.remote.default_category,
        config.remote.timeout(),
    )
    .context("Failed to build HTTP client")?;

    // Create application state
    let app_state = AppState::new(
        config.clone(),
        Arc::new(SqliteKv::new(db_pool.clone())),
        Arc::new(remote),
    )
    .await;

    // First cycle runs immediately, then every interval
    let scheduler = SyncScheduler::spawn(
        app_state.coordinator().clone(),
        IntervalTicker::new(config.remote.sync_interval()),
    );

    let app = routes::app(app_state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], config.server.port)));
    tracing::info!("Quote Sync listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // A hung fetch must not keep the process alive
    if tokio::time::timeout(Duration::from_secs(5), scheduler.shutdown())
        .await
        .is_err()
    {
        tracing::warn!("Sync cycle still running at shutdown, abandoning it");
    }

    db_pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
