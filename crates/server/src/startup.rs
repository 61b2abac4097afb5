use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use service::person::{open_repository, PersonService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured store and build the router around it.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let backend = cfg
        .database
        .backend()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let store_file = match &backend {
        StoreBackend::File(path) => Some(path.as_path()),
        StoreBackend::Postgres(_) => None,
    };
    common::env::ensure_env(&cfg.server.static_dir, store_file).await?;

    let repo = open_repository(&cfg.database)
        .await
        .map_err(|e| StartupError::Store(e.to_string()))?;
    let state = AppState::new(PersonService::new(repo));

    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    // host may be a name, so let tokio resolve it
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, static_dir = %cfg.server.static_dir, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
