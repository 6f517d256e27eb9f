use crate::config::{Config, StorageConfig, StorageDriver};
use crate::state::AppState;
use crate::store::{DeviceStore, InMemoryDeviceStore, SqliteDeviceStore};
use crate::routes;
use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::sqlite;
use std::path::Path;
use std::sync::Arc;
use tokio::{net::TcpListener, signal, task::JoinSet};
use tokio_util::sync::CancellationToken;

pub(crate) static MIGRATOR: Migrator = sqlx::migrate!();

async fn connect_database(dir: &Path) -> anyhow::Result<sqlx::SqlitePool> {
    let path = dir.join("devices.db");
    let options = sqlite::SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = sqlx::SqlitePool::connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", path.display()))?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::debug!("Database ready at {}", path.display());
    Ok(pool)
}

async fn build_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn DeviceStore>> {
    match config.driver {
        StorageDriver::Sqlite => {
            let dir = config.parse_dir()?;
            let pool = connect_database(&dir).await?;
            Ok(Arc::new(SqliteDeviceStore::new(pool)))
        }
        StorageDriver::Memory => {
            tracing::warn!("Using in-memory storage, devices will be lost on shutdown");
            Ok(Arc::new(InMemoryDeviceStore::new()))
        }
    }
}

pub async fn run_until_done(config: &Config, bind: TcpListener) -> anyhow::Result<()> {
    let store = build_store(&config.storage).await?;
    let state = AppState::build(store);
    let shutdown_signal = CancellationToken::new();
    let mut join_set = JoinSet::new();
    // register ctrl+c signal
    {
        let shutdown_signal = shutdown_signal.clone();
        join_set.spawn(async move {
            signal::ctrl_c().await?;
            tracing::debug!("Received Ctrl+C, start terminating");
            shutdown_signal.cancel();
            anyhow::Ok(())
        });
    }
    #[cfg(unix)]
    {
        let shutdown_signal = shutdown_signal.clone();
        join_set.spawn(async move {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            sigterm.recv().await;
            tracing::debug!("Received SIGTERM signal, start terminating");
            shutdown_signal.cancel();
            anyhow::Ok(())
        });
    }
    let routes = routes::build().with_state(state);
    axum::serve(bind, routes)
        .with_graceful_shutdown(async move {
            shutdown_signal.cancelled().await;
        })
        .await
        .context("Server terminated unexpectedly")?;
    join_set.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
