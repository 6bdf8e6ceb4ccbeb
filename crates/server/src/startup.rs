use std::net::SocketAddr;
use std::process::ExitCode;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::runtime::Runtime;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth};
use service::auth::service::AuthConfig;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config from `CONFIG_PATH`/config.toml, or from env vars when no file is readable
pub fn load_config() -> Result<AppConfig, StartupError> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(err = %file_err, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Multi-thread runtime; `None` or `Some(0)` keeps tokio's default worker count.
pub fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = worker_threads.filter(|n| *n > 0) {
        builder.worker_threads(n);
    }
    builder.build()
}

fn install_panic_hook() {
    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |panic| {
        error!(event = "panic", pid, message = %panic, "unhandled panic occurred");
    }));
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(err = %e, "cannot listen for Ctrl+C");
        return std::future::pending().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Connect, migrate and serve `cfg` until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = auth::ServerState::from_db(
        db,
        AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_hours: cfg.auth.token_ttl_hours },
    );
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Async entry for callers that already own a runtime
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    serve(load_config()?).await
}

/// Process entry for the `server` binary: owns the runtime, sized from `[server].worker_threads`.
pub fn launch() -> ExitCode {
    dotenv().ok();
    init_logging_from_env();
    install_panic_hook();

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", err = %e, "cannot start without configuration");
            return ExitCode::FAILURE;
        }
    };
    let rt = match build_runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", err = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "booking service starting"
    );
    match rt.block_on(serve(cfg)) {
        Ok(()) => {
            info!(event = "stop", "server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", err = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_honours_configured_workers() {
        let rt = build_runtime(Some(2)).unwrap();
        assert_eq!(rt.metrics().num_workers(), 2);
        assert_eq!(rt.block_on(async { 40 + 2 }), 42);
    }

    #[test]
    fn zero_workers_fall_back_to_default() {
        let rt = build_runtime(Some(0)).unwrap();
        assert!(rt.metrics().num_workers() >= 1);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 4000;
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:4000");
    }
}
