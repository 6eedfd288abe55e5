use std::sync::Arc;

use anyhow::Context;
use bistro_core::schema::collections;
use bistro_core::{DocumentStore, MemoryStore};
use bistro_server::{build_router, AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn DocumentStore> = match &config.seed_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading seed file {}", path.display()))?;
            let store = MemoryStore::from_seed_json(&raw)
                .with_context(|| format!("loading seed file {}", path.display()))?;
            tracing::info!(seed = %path.display(), "store seeded");
            Arc::new(store.declare(&collections::ALL))
        }
        None => Arc::new(MemoryStore::new().declare(&collections::ALL)),
    };

    let app = build_router(AppState::new(store, config.query_timeout));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, timeout = ?config.query_timeout, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
