use anyhow::Result;
use std::net::SocketAddr;

mod handlers;
mod middleware;
mod routes;
mod state;

use common::config::Settings;
use common::db::DbPool;
use common::telemetry;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Settings::load()?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_logging(&config.observability.log_level, true)?;

    let db_pool = DbPool::new(&config.database).await?;

    // Schema lives in migrations/ and is applied out of band
    // sqlx::migrate!("../migrations").run(db_pool.pool()).await?;

    let metrics_handle = telemetry::init_metrics()?;

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState::new(db_pool.clone(), config, metrics_handle);
    let app = routes::create_router(state);

    tracing::info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when either Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
