//! CommunityConnect HTTP server.
//!
//! Run with:
//! ```bash
//! STORAGE_BACKEND=postgres DATABASE_URL=postgres://... cargo run -p community-connect-server
//! ```

use community_connect_core::environment::{Clock, SystemClock};
use community_connect_core::store::{DiscussionStore, EventStore};
use community_connect_postgres::{PostgresDiscussionStore, PostgresEventStore};
use community_connect_server::{AppState, Config, StorageBackend, build_router, metrics};
use community_connect_testing::{InMemoryDiscussionStore, InMemoryEventStore};
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "community_connect=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(backend = %config.storage.backend, "Starting CommunityConnect server");

    if config.metrics.enabled {
        let metrics_addr: SocketAddr = config.metrics_address().parse()?;
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()?;
        metrics::register_business_metrics();
        info!("Prometheus metrics available at http://{metrics_addr}/metrics");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (state, pool) = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            let events: Arc<dyn EventStore> = Arc::new(InMemoryEventStore::new());
            let discussions: Arc<dyn DiscussionStore> = Arc::new(InMemoryDiscussionStore::new());
            (AppState::from_stores(events, discussions, clock), None)
        }
        StorageBackend::Postgres => {
            let pool = community_connect_postgres::connect(
                &config.storage.postgres.url,
                &config.storage.postgres.pool_settings(),
            )
            .await?;
            community_connect_postgres::migrate(&pool).await?;
            info!("Database connected and migrated");

            let events: Arc<dyn EventStore> = Arc::new(PostgresEventStore::from_pool(pool.clone()));
            let discussions: Arc<dyn DiscussionStore> =
                Arc::new(PostgresDiscussionStore::from_pool(pool.clone()));
            (AppState::from_stores(events, discussions, clock), Some(pool))
        }
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %config.bind_address(), "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    if let Some(pool) = pool {
        close_pool(pool, Duration::from_secs(config.server.shutdown_timeout)).await;
    }
    info!("Graceful shutdown complete");
    Ok(())
}

async fn close_pool(pool: PgPool, timeout: Duration) {
    if tokio::time::timeout(timeout, pool.close()).await.is_err() {
        warn!("Database pool did not close within the shutdown timeout");
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
