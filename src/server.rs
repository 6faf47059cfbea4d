//! HTTP server initialization and runtime setup.
//!
//! Selects the click store, builds the registry client and runs the Axum
//! server until SIGINT or SIGTERM.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{ClickStore, DestinationRegistry};
use crate::infrastructure::persistence::{MemoryClickStore, PgClickStore};
use crate::infrastructure::registry::HttpDestinationRegistry;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Click store (PostgreSQL with migrations, or in-memory)
/// - Destination registry client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The registry base URL is unusable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let registry: Arc<dyn DestinationRegistry> = Arc::new(
        HttpDestinationRegistry::new(&config.registry_url, config.registry_timeout())
            .context("Failed to build destination registry client")?,
    );
    tracing::info!(url = %config.registry_url, "Destination registry configured");

    let state = AppState::new(store, registry);
    let app = app_router(state, &config.cors_allow_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the click store selected by the configuration.
async fn build_store(config: &Config) -> Result<Arc<dyn ClickStore>> {
    match (config.store_backend(), config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            let store = PgClickStore::new(Arc::new(pool));
            store
                .migrate()
                .await
                .context("Failed to apply database migrations")?;
            tracing::info!("Click store: postgres");

            Ok(Arc::new(store))
        }
        _ => {
            tracing::warn!("Click store: memory (clicks are lost on restart)");
            Ok(Arc::new(MemoryClickStore::new()))
        }
    }
}

/// Opens a connection pool tuned by the `DB_*` pool settings.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
///
/// In-flight requests finish before [`run`] returns; click recordings that
/// are still running when the runtime stops are dropped.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received, draining connections");
}
