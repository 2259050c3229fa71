//! vitrine-gateway server entry point.
//!
//! Starts the Axum HTTP server for the business directory REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vitrine_gateway::api;
use vitrine_gateway::app_state::AppState;
use vitrine_gateway::config::GatewayConfig;
use vitrine_gateway::persistence::{BusinessStore, MemoryBusinessStore, PostgresBusinessStore};
use vitrine_gateway::service::BusinessService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting vitrine-gateway");

    // Build persistence layer. The pool is lazy, so nothing touches the
    // database here; the first request runs the connectivity probe.
    let fallback = if config.fallback_seed_enabled {
        MemoryBusinessStore::seeded()
    } else {
        MemoryBusinessStore::new()
    };

    let primary: Option<Arc<dyn BusinessStore>> = if config.persistence_enabled {
        match PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_lazy(&config.database_url)
        {
            Ok(pool) => Some(Arc::new(PostgresBusinessStore::new(pool))),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "invalid database configuration; starting on the fallback dataset"
                );
                None
            }
        }
    } else {
        tracing::info!("persistence disabled; serving the in-memory dataset");
        None
    };

    // Build service layer
    let business_service = Arc::new(BusinessService::new(primary, fallback));

    // Build application state
    let app_state = AppState { business_service };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
