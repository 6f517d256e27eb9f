use anyhow::Context;
use tokio::net::TcpListener;

mod common;
mod config;
mod logging;
mod middlewares;
mod models;
mod routes;
mod server;
mod services;
mod state;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    logging::registry_logs(config.logs.level);
    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    server::run_until_done(&config, listener).await
}
