use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::player::repo::seaorm::SeaOrmPlayerRepository;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present (errors in it are fatal), otherwise env vars.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = configs::config_path();
    let mut cfg = if Path::new(&path).exists() {
        configs::load_from_file(&path).map_err(|e| StartupError::InvalidConfig(e.to_string()))?
    } else {
        warn!(%path, "config file not found; using environment");
        let mut cfg = AppConfig::from_env();
        if cfg.database.url.trim().is_empty() {
            cfg.database.url = models::db::DATABASE_URL.clone();
        }
        cfg
    };
    cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Connect, migrate and assemble the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    // 启动时执行迁移，确保 player 表存在
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    info!("player schema up to date");

    let state = ServerState::new(Arc::new(SeaOrmPlayerRepository::new(db)), cfg.players.default_page_size);
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting player registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let s = ServerConfig { host: "127.0.0.1".into(), port: 8081, worker_threads: None };
        assert_eq!(bind_addr(&s).unwrap().port(), 8081);
        let bad = ServerConfig { host: "not a host".into(), port: 1, worker_threads: None };
        assert!(bind_addr(&bad).is_err());
    }
}
