use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;
use service::{runtime, storage::json_file_store::JsonFileStore, toy_service::ToyService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; defaults plus env vars when it cannot be read.
fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unavailable; using defaults and environment");
            AppConfig::from_env()
        }
    }
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Open the toys file and assemble the router around the loaded catalog.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.data_dir, &cfg.storage.toys_file).await?;

    let store = JsonFileStore::new(&cfg.storage.toys_file).await?;
    info!(path = %store.path().display(), "toys file opened");
    let toys = ToyService::with_page_size(Arc::new(store), cfg.catalog.page_size).await?;
    if cfg.auth.jwt_secret.is_none() {
        warn!("JWT_SECRET not set; using the development secret");
    }
    let state = ServerState {
        toys,
        auth: ServerAuthConfig { jwt_secret: cfg.auth.secret().to_string() },
    };
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, toys_file = %cfg.storage.toys_file, "starting toy catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
