//! Server startup and wiring.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Request;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

use crate::config::Config;
use crate::db::{create_pool, verify_connection, Database, DbConfig};
use crate::routes;

/// Request timeout duration.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build and configure the complete application.
///
/// Resolves the pool configuration, connects, and verifies the store is
/// reachable before any route is wired; errors here must abort startup.
pub async fn build_app(config: &Config) -> anyhow::Result<(Router, SocketAddr)> {
    let db_config = DbConfig::resolve(config)?;
    let pool = create_pool(&db_config).await?;
    verify_connection(&pool).await?;
    info!("MySQL connection established successfully");

    let state = AppState {
        db: Database::new(pool),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                    )
                })
                .on_response(tower_http::trace::DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)));

    let app = routes::router(state).layer(middleware);

    Ok((app, addr))
}
