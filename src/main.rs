//! user-service: REST CRUD service for users backed by MySQL.

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use user_service::config::Config;
use user_service::startup::build_app;
use user_service::telemetry::setup_telemetry;

/// Build version (injected at compile time).
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::init()?;
    setup_telemetry(&config);

    info!(
        version = VERSION,
        port = config.port,
        pid = std::process::id(),
        "Starting user-service"
    );

    // The store must be reachable before the listener binds.
    let (app, addr) = match build_app(&config).await {
        Ok(parts) => parts,
        Err(e) => {
            error!(error = %e, "Unable to start server due to database connection error");
            std::process::exit(1);
        }
    };

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
