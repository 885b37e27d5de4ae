use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::{
    booking::{repo::SeaOrmBookingRepository, BookingRepository, BookingService},
    municipality::{GeoApiDirectory, MunicipalityDirectory},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    errors::StartupError,
    routes::{self, AppState},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Directory holding a file-backed SQLite database, if the URL names one.
fn sqlite_data_dir(url: &str) -> Option<String> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next()?;
    if file.is_empty() || file.contains(":memory:") {
        return None;
    }
    Path::new(file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
}

/// Connect storage, apply migrations and wire the services.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    // SQLite 文件库需要先创建数据目录
    if let Some(dir) = sqlite_data_dir(&cfg.database.url) {
        common::env::ensure_env(&dir).await?;
    }

    // DB connection
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    // 启动时执行迁移（含 slot 唯一索引）
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!(event = "migrations_applied", "booking schema up to date");

    let repo: Arc<dyn BookingRepository> = Arc::new(SeaOrmBookingRepository::new(db));
    // 市政目录失败只影响 /api/municipalities
    let directory: Arc<dyn MunicipalityDirectory> = Arc::new(GeoApiDirectory::from_config(&cfg.municipalities)?);
    Ok(AppState::new(Arc::new(BookingService::new(repo)), directory))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, municipalities_url = %cfg.municipalities.url, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
