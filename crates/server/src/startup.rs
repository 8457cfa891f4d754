use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Router};
use configs::AppConfig;
use migration::MigratorTrait;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::{JsonApiError, StartupError};
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn handle_timeout(err: BoxError) -> JsonApiError {
    if err.is::<Elapsed>() {
        warn!("request_timed_out");
        return JsonApiError::new(StatusCode::REQUEST_TIMEOUT, "request timed out");
    }
    error!(error = %err, "middleware_failure");
    JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Bound every request by `request_timeout`; a late request gets a 408 envelope.
pub fn with_timeout(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    with_timeout(routes::build_router(state, build_cors()), request_timeout)
}

/// Public entry: load configuration, connect the store and serve HTTP
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db).await.map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations_applied");
    }

    let state = AppState::from_db(db, cfg.pagination.default_limit)?;
    let app = build_app(state, Duration::from_secs(cfg.server.request_timeout_secs));

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, timeout_secs = cfg.server.request_timeout_secs, "http_listening");
    axum::serve(listener, app).await?;
    Ok(())
}
