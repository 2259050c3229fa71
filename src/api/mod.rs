//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Business endpoints are mounted under `/api/v1`; health and
//! configuration endpoints live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    info(
        title = "Vitrine Gateway API",
        description = "Local business directory: registration, lookup, schedule status resolution, and store failover."
    ),
    paths(
        handlers::business::create_business,
        handlers::business::list_businesses,
        handlers::business::lookup_business,
        handlers::business::get_business_by_owner,
        handlers::business::get_business,
        handlers::business::update_business,
        handlers::business::delete_business,
        handlers::system::health_handler,
        handlers::system::categories_handler,
    ),
    tags(
        (name = "Businesses", description = "Business directory management"),
        (name = "System", description = "Health and configuration")
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature enabled the OpenAPI document is also
/// served, with the interactive UI at `/docs`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", <ApiDoc as utoipa::OpenApi>::openapi()),
    );

    router
}
