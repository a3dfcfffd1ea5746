use std::net::SocketAddr;
use std::future::Future;

use axum::Router;
use configs::{AppConfig, BackendKind};
use service::{runtime, storage::DocumentStore, Services};
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire storage and services from configuration into a router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    if cfg.storage.backend == BackendKind::File {
        common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    }
    let backend = runtime::build_backend(&cfg.storage).await?;
    let store = DocumentStore::new(backend);
    let state = AppState::new(Services::new(store, &cfg.auth));
    Ok(routes::build_router(state, routes::default_cors()))
}

/// Serve until `shutdown` resolves.
pub async fn serve(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "portal api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("portal api stopped");
    Ok(())
}
