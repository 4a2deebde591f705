mod api;
mod bootstrap;
mod health;

use anyhow::Result;
use forno_core::config::{AppConfig, LoadOptions};
use tokio::net::TcpListener;
use tracing::info;

fn init_logging(config: &AppConfig) {
    use forno_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let state = api::ApiState { catalog: app.catalog.clone(), orders: app.orders.clone() };
    let router = api::router(state, &app.config.storage.images_dir)
        .merge(health::router(app.catalog.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = TcpListener::bind(&address).await?;
    info!(
        event_name = "system.server.started",
        bind_address = %address,
        catalog_path = %app.config.storage.catalog_path.display(),
        orders_path = %app.config.storage.orders_path.display(),
        "forno server listening"
    );

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    info!(event_name = "system.server.stopped", "forno server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(event_name = "system.server.shutdown_signal", "shutdown signal received");
}
