//! System endpoints: health check, category catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    /// Which store is serving requests: `primary` or `fallback`.
    storage: String,
}

/// `GET /health`: service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, current timestamp, and whether requests are served from the primary store or the in-memory fallback dataset.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storage = if state.business_service.is_using_fallback().await {
        "fallback"
    } else {
        "primary"
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: storage.to_string(),
        }),
    )
}

/// Directory category info.
#[derive(Debug, Serialize, ToSchema)]
struct CategoryInfo {
    slug: &'static str,
    label: &'static str,
}

/// `GET /config/categories`: list directory categories.
#[utoipa::path(
    get,
    path = "/config/categories",
    tag = "System",
    summary = "List directory categories",
    description = "Returns the category slugs the directory filter accepts, with display labels.",
    responses(
        (status = 200, description = "Category catalog", body = Vec<CategoryInfo>),
    )
)]
pub async fn categories_handler() -> impl IntoResponse {
    let categories = vec![
        CategoryInfo {
            slug: "bakery",
            label: "Bakeries",
        },
        CategoryInfo {
            slug: "books",
            label: "Bookstores",
        },
        CategoryInfo {
            slug: "cafe",
            label: "Cafes",
        },
        CategoryInfo {
            slug: "fitness",
            label: "Fitness & Wellness",
        },
        CategoryInfo {
            slug: "grocery",
            label: "Groceries",
        },
        CategoryInfo {
            slug: "repair",
            label: "Repair Shops",
        },
        CategoryInfo {
            slug: "restaurant",
            label: "Restaurants",
        },
        CategoryInfo {
            slug: "retail",
            label: "Retail & Boutiques",
        },
    ];
    (StatusCode::OK, Json(categories))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/categories", get(categories_handler))
}
