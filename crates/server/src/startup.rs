use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, CorsConfig};
use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// CORS layer from `[cors] allow_origins`; `*` allows every origin.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    if cfg.is_permissive() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = cfg
        .allow_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {}", e)))
}

/// Load configuration (normalized and validated); used by the binary before
/// building the runtime.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging_from_env();

    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;

    let cors = build_cors(&cfg.cors);
    let app: Router = routes::build_router(AppState { db }, cors);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, sqlite = cfg.database.is_sqlite(), "starting vehicle registry server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}
